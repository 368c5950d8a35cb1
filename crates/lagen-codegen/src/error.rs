//! Error types for header generation

use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that abort a generation run
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The output sink rejected a write
    #[error("I/O error while writing generated text: {0}")]
    Io(#[from] std::io::Error),

    /// A bounded text buffer was too small for the rendered fragment
    #[error("Formatted text needs {needed} bytes but the buffer holds at most {capacity}")]
    Truncated { capacity: usize, needed: usize },

    /// A formatting trait implementation reported an error
    #[error("Formatting a generated name failed")]
    Format,

    /// Component count a vector type cannot have
    #[error("Component count {count} is out of range ({min}..={max})")]
    ComponentCount {
        count: usize,
        min: usize,
        max: usize,
    },

    /// Guard symbol is not a usable C preprocessor identifier
    #[error("Invalid guard symbol '{symbol}': {reason}")]
    InvalidGuard { symbol: String, reason: String },
}
