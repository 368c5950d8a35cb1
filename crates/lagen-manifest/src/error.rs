//! Error types for configuration parsing and validation

use lagen_codegen::CodegenError;
use thiserror::Error;

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Errors that can occur while loading a `lagen.toml`
#[derive(Debug, Error)]
pub enum ManifestError {
    /// I/O error reading the manifest file
    #[error("I/O error: {0}")]
    Io(String),

    /// TOML parsing error
    #[error("Failed to parse manifest: {0}")]
    Parse(String),

    /// Guard symbol is not a usable C preprocessor identifier
    #[error("Invalid guard symbol '{0}': {1}")]
    InvalidGuard(String, String),

    /// Element type not present in the catalog
    #[error("Unknown element type '{0}'")]
    UnknownType(String),

    /// Operation not present in the catalog
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// Component count outside the supported range
    #[error("Component count {0} is out of range ({1}..={2})")]
    SizeOutOfRange(usize, usize, usize),

    /// The same entry is listed twice in a selection
    #[error("Duplicate entry '{1}' in select.{0}")]
    Duplicate(&'static str, String),

    /// A selection list that would generate nothing
    #[error("select.{0} must not be empty")]
    EmptySelection(&'static str),

    /// Any other rejection from the generator
    #[error(transparent)]
    Codegen(CodegenError),
}

impl From<CodegenError> for ManifestError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::ComponentCount { count, min, max } => {
                ManifestError::SizeOutOfRange(count, min, max)
            }
            CodegenError::InvalidGuard { symbol, reason } => {
                ManifestError::InvalidGuard(symbol, reason)
            }
            other => ManifestError::Codegen(other),
        }
    }
}
