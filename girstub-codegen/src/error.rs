//! Error types for stub generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for stub generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// GIR parsing error.
    #[error("GIR parse error: {0}")]
    Parse(#[from] girstub_schema::ParseError),

    /// Repository validation error.
    #[error("schema error: {0}")]
    Schema(#[from] girstub_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A GIR file or directory does not exist.
    #[error("GIR path not found: {}", path.display())]
    GirNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// Stub generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a not-found error for the given path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::GirNotFound { path: path.into() }
    }
}
