//! Batch generation of a stub tree from a GIR directory.
//!
//! Stubs are written to `{site_packages}/gi-stubs/repository/{Module}.pyi`,
//! the layout type checkers pick up for the `gi.repository` package.

use crate::config::StubConfig;
use crate::error::CodegenError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Stub tree location relative to `site-packages`.
pub const STUB_SUBDIR: &str = "gi-stubs/repository";

/// A `.gir` file found in a GIR directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GirFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem, e.g. `Gtk-4.0`.
    pub stem: String,
    /// Module name, e.g. `Gtk`.
    pub module: String,
    /// Parsed `major.minor` version suffix.
    pub version: Option<(u32, u32)>,
}

impl GirFile {
    /// Creates a GIR file entry from its path.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the file name is not UTF-8.
    pub fn from_path(path: PathBuf) -> Result<Self, CodegenError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                CodegenError::generation(format!("non UTF-8 file name: {}", path.display()))
            })?
            .to_string();
        let (module, version) = split_stem(&stem);

        Ok(Self {
            module: module.to_string(),
            version,
            stem,
            path,
        })
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Destination directory.
    pub destination: PathBuf,
    /// Stub files written.
    pub written: Vec<PathBuf>,
    /// GIR files skipped because a newer version of the module exists.
    pub skipped: Vec<PathBuf>,
}

/// Returns the path of `{module}-{version}.gir` inside `gir_dir`.
#[must_use]
pub fn gir_path(gir_dir: &Path, module: &str, version: &str) -> PathBuf {
    gir_dir.join(format!("{module}-{version}.gir"))
}

/// Splits a GIR file stem into module name and `major.minor` version.
///
/// A stem without a `-<digits>.<digits>` suffix is a bare module name.
#[must_use]
pub fn split_stem(stem: &str) -> (&str, Option<(u32, u32)>) {
    let Some((module, version)) = stem.rsplit_once('-') else {
        return (stem, None);
    };
    let Some((major, minor)) = version.split_once('.') else {
        return (stem, None);
    };

    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_number(major) || !is_number(minor) {
        return (stem, None);
    }

    match (major.parse(), minor.parse()) {
        (Ok(major), Ok(minor)) => (module, Some((major, minor))),
        _ => (stem, None),
    }
}

/// Returns the module name for a GIR file stem, e.g. `Gtk` for `Gtk-4.0`.
#[must_use]
pub fn module_name(stem: &str) -> &str {
    split_stem(stem).0
}

/// Lists the `.gir` files in `gir_dir`, sorted by stem.
///
/// Files whose names are not UTF-8 are skipped with a warning.
///
/// # Errors
/// Returns `CodegenError::GirNotFound` if the directory does not exist, or
/// an IO error if it cannot be read.
pub fn discover(gir_dir: &Path) -> Result<Vec<GirFile>, CodegenError> {
    if !gir_dir.is_dir() {
        return Err(CodegenError::not_found(gir_dir));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(gir_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("gir") {
            continue;
        }
        match GirFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(e) => tracing::warn!("skipping GIR file: {e}"),
        }
    }

    files.sort_by(|a, b| a.stem.cmp(&b.stem));
    Ok(files)
}

/// Generates a stub for every module in `gir_dir` under `site_packages`.
///
/// Only the highest version of each module is generated. An empty
/// `__init__.py` is created if the destination has none.
///
/// # Errors
/// Returns `CodegenError` if the GIR directory cannot be read, a GIR file
/// fails to parse, or a stub cannot be written.
pub fn generate_all(
    gir_dir: &Path,
    site_packages: &Path,
    config: &StubConfig,
) -> Result<BatchReport, CodegenError> {
    let files = discover(gir_dir)?;

    let destination = site_packages.join(STUB_SUBDIR);
    if !destination.exists() {
        tracing::info!("mkdir: {}", destination.display());
        std::fs::create_dir_all(&destination)?;
    }

    let mut report = BatchReport {
        destination: destination.clone(),
        ..BatchReport::default()
    };

    let mut modules: BTreeMap<String, Vec<GirFile>> = BTreeMap::new();
    for file in files {
        modules.entry(file.module.clone()).or_default().push(file);
    }

    for (module, mut versions) in modules {
        versions.sort_by_key(|f| f.version);
        let Some(newest) = versions.pop() else {
            continue;
        };
        for older in versions {
            tracing::warn!(
                "skipping {}: {} is newer",
                older.path.display(),
                newest.stem
            );
            report.skipped.push(older.path);
        }

        let pyi = destination.join(format!("{module}.pyi"));
        tracing::info!("{} -> {}", newest.stem, pyi.display());
        let stub = crate::generate_from_file(&newest.path, config)?;
        std::fs::write(&pyi, stub)?;
        report.written.push(pyi);
    }

    let init = destination.join("__init__.py");
    if !init.exists() {
        std::fs::write(&init, "")?;
    }

    Ok(report)
}
