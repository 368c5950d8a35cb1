//! lagen manifest parsing
//!
//! This crate handles parsing and validation of `lagen.toml` files, which
//! choose the guard symbols and the part of the catalog to generate.

pub mod error;
pub mod manifest;

pub use error::{ManifestError, Result};
pub use manifest::{GuardsConfig, Manifest, SelectConfig};

use std::path::Path;
use tracing::debug;

/// Conventional manifest file name
pub const MANIFEST_FILE_NAME: &str = "lagen.toml";

/// Parse a manifest from a file path
pub fn from_path(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    debug!("Loading manifest from {}", path.display());
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ManifestError::Io(format!("{}: {}", path.display(), e)))?;
    from_str(&contents)
}

/// Parse a manifest from a string
pub fn from_str(s: &str) -> Result<Manifest> {
    toml::from_str(s).map_err(|e| ManifestError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_manifest_parse() {
        let manifest = from_str("").unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [guards]
            implementation = "VEC_IMPLEMENTATION"

            [select]
            sizes = [3]
        "#;

        let manifest = from_str(toml).unwrap();
        assert_eq!(manifest.guards.header, "LA_H_");
        assert_eq!(manifest.guards.implementation, "VEC_IMPLEMENTATION");
        assert_eq!(manifest.select.sizes, vec![3]);
        assert_eq!(manifest.select.types.len(), 3);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml = r#"
            [select]
            matrices = true
        "#;

        assert!(matches!(from_str(toml), Err(ManifestError::Parse(_))));
    }
}
