//! # girstub Codegen
//!
//! Python stub generation from GIR repositories.
//!
//! This crate provides:
//! - `.pyi` text generation for classes, enums, constants and functions
//! - Configuration of indentation, imports and strictness
//! - Batch generation of a `gi-stubs/repository` tree

pub mod batch;
pub mod config;
pub mod error;
pub mod generator;
pub mod python;

pub use batch::{BatchReport, GirFile, discover, generate_all, gir_path, module_name};
pub use config::StubConfig;
pub use error::CodegenError;
pub use generator::Generator;

use girstub_schema::{StubIr, parse_repository_with, validate_repository};

/// Generates a stub module from a GIR document string.
///
/// # Arguments
/// * `xml` - GIR document content
///
/// # Returns
/// Generated `.pyi` text.
///
/// # Errors
/// Returns `CodegenError` if parsing fails.
pub fn generate_from_xml(xml: &str) -> Result<String, CodegenError> {
    generate_from_xml_with(xml, &StubConfig::default())
}

/// Generates a stub module from a GIR document string with a configuration.
///
/// # Errors
/// Returns `CodegenError` if parsing fails, or if strict mode is enabled and
/// the repository fails validation.
pub fn generate_from_xml_with(xml: &str, config: &StubConfig) -> Result<String, CodegenError> {
    let repository = parse_repository_with(xml, &config.parse_options())?;
    if config.strict {
        validate_repository(&repository)?;
    }
    let ir = StubIr::from_repository(&repository);
    let generator = Generator::new(&ir).with_config(config);
    Ok(generator.generate())
}

/// Generates a stub module from a GIR file.
///
/// # Arguments
/// * `path` - Path to the `.gir` file
/// * `config` - Generation options
///
/// # Returns
/// Generated `.pyi` text.
///
/// # Errors
/// Returns `CodegenError` if the file is missing or unreadable, or if
/// parsing or validation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &StubConfig,
) -> Result<String, CodegenError> {
    if !path.is_file() {
        return Err(CodegenError::not_found(path));
    }
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml_with(&xml, config)
}
