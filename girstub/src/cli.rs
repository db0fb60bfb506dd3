//! Command line interface for the `girstub` binary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use girstub_codegen::config::DEFAULT_INDENT;
use girstub_codegen::{StubConfig, discover, generate_all, generate_from_file, gir_path};
use std::io::Write;
use std::path::PathBuf;

/// Generate PyGObject type stubs from GObject Introspection files.
#[derive(Parser, Debug)]
#[command(name = "girstub", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Fail on unknown GIR elements and validate before generating
    #[arg(long, global = true)]
    pub strict: bool,

    /// Module for the `from gi.repository import` line (repeatable)
    #[arg(long = "import", value_name = "MODULE", global = true)]
    pub imports: Vec<String>,

    /// Spaces per indentation level
    #[arg(long, value_name = "N", global = true, default_value_t = DEFAULT_INDENT)]
    pub indent: usize,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the stub for one module to stdout
    Gen {
        /// Directory holding the `.gir` files
        gir_dir: PathBuf,
        /// Module name, e.g. `Gtk`
        module: String,
        /// Module version, e.g. `4.0`
        version: String,
    },
    /// Write stubs for every module into a site-packages tree
    All {
        /// Directory holding the `.gir` files
        gir_dir: PathBuf,
        /// Target `site-packages` directory
        site_packages: PathBuf,
    },
    /// List the GIR files available in a directory
    List {
        /// Directory holding the `.gir` files
        gir_dir: PathBuf,
    },
}

impl Cli {
    /// Builds the generation options from the global flags.
    #[must_use]
    pub fn config(&self) -> StubConfig {
        let mut config = StubConfig::new()
            .with_indent(self.indent)
            .with_strict(self.strict);
        if !self.imports.is_empty() {
            config = config.with_imports(self.imports.clone());
        }
        config
    }
}

/// Runs a parsed command, writing command output to `out`.
///
/// # Errors
/// Returns an error if the GIR input cannot be read or parsed, or if output
/// cannot be written.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = cli.config();

    match &cli.command {
        Commands::Gen {
            gir_dir,
            module,
            version,
        } => {
            let path = gir_path(gir_dir, module, version);
            tracing::debug!("generating {}", path.display());
            let stub = generate_from_file(&path, &config)
                .with_context(|| format!("failed to generate stub from {}", path.display()))?;
            out.write_all(stub.as_bytes())?;
        }
        Commands::All {
            gir_dir,
            site_packages,
        } => {
            let report = generate_all(gir_dir, site_packages, &config).with_context(|| {
                format!("failed to generate stubs from {}", gir_dir.display())
            })?;
            tracing::info!(
                written = report.written.len(),
                skipped = report.skipped.len(),
                "stubs written to {}",
                report.destination.display()
            );
        }
        Commands::List { gir_dir } => {
            let files = discover(gir_dir)
                .with_context(|| format!("failed to list {}", gir_dir.display()))?;
            for file in files {
                writeln!(out, "{}", file.stem)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
