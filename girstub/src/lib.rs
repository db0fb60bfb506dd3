//! # girstub
//!
//! Generate PyGObject type stubs (`.pyi`) from GObject Introspection
//! (`.gir`) repositories.
//!
//! ## Quick Start
//!
//! ```ignore
//! use girstub::prelude::*;
//!
//! let config = StubConfig::default();
//! let stub = generate_from_file(&gir_path(gir_dir, "Gtk", "4.0"), &config)?;
//! print!("{stub}");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - GIR parsing, validation and the stub IR
//! - [`codegen`] - `.pyi` generation and batch output
//! - [`cli`] - the `girstub` command line

pub mod cli;
pub mod prelude;

/// GIR parsing, validation and intermediate representation.
pub mod schema {
    pub use girstub_schema::*;
}

/// Stub generation from GIR repositories.
pub mod codegen {
    pub use girstub_codegen::*;
}

// Re-export commonly used items at the crate root
pub use girstub_codegen::{
    BatchReport, CodegenError, Generator, StubConfig, generate_all, generate_from_file,
    generate_from_xml, gir_path,
};
pub use girstub_schema::{ParseError, Repository, StubIr, parse_repository};
