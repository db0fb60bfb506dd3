//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use girstub::prelude::*;
//! ```

// Schema types
pub use girstub_schema::{
    ParseError, ParseOptions, Repository, SchemaError, StubIr, parse_repository,
    parse_repository_with, validate_repository,
};

// Codegen types
pub use girstub_codegen::{
    BatchReport, CodegenError, Generator, GirFile, StubConfig, discover, generate_all,
    generate_from_file, generate_from_xml, gir_path, module_name,
};
