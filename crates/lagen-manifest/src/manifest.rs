//! Manifest structure definitions

use crate::error::{ManifestError, Result};
use lagen_codegen::catalog::{MAX_COMPONENTS, MIN_COMPONENTS};
use lagen_codegen::driver::{DEFAULT_HEADER_GUARD, DEFAULT_IMPLEMENTATION_GUARD};
use lagen_codegen::{ElementType, Generator, Guards, Operation, Selection, OP_DEFS, TYPE_DEFS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Complete `lagen.toml` contents
///
/// Every section is optional; an empty manifest describes the default header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Preprocessor guard symbols
    #[serde(default)]
    pub guards: GuardsConfig,

    /// Which part of the catalog to generate
    #[serde(default)]
    pub select: SelectConfig,
}

/// `[guards]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardsConfig {
    /// Include guard around the declarations (default: `LA_H_`)
    #[serde(default = "default_header_guard")]
    pub header: String,

    /// Symbol enabling the function bodies (default: `LA_IMPLEMENTATION`)
    #[serde(default = "default_implementation_guard")]
    pub implementation: String,
}

fn default_header_guard() -> String {
    DEFAULT_HEADER_GUARD.to_string()
}

fn default_implementation_guard() -> String {
    DEFAULT_IMPLEMENTATION_GUARD.to_string()
}

impl Default for GuardsConfig {
    fn default() -> Self {
        Self {
            header: default_header_guard(),
            implementation: default_implementation_guard(),
        }
    }
}

/// `[select]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectConfig {
    /// Component counts
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,

    /// Element types, by C spelling
    #[serde(default = "default_types")]
    pub types: Vec<String>,

    /// Operations, by name suffix
    #[serde(default = "default_ops")]
    pub ops: Vec<String>,
}

fn default_sizes() -> Vec<usize> {
    (MIN_COMPONENTS..=MAX_COMPONENTS).collect()
}

fn default_types() -> Vec<String> {
    TYPE_DEFS.iter().map(|ty| ty.name.to_string()).collect()
}

fn default_ops() -> Vec<String> {
    OP_DEFS.iter().map(|op| op.suffix.to_string()).collect()
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            types: default_types(),
            ops: default_ops(),
        }
    }
}

impl Manifest {
    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        self.to_generator().map(|_| ())
    }

    /// Build a generator for this manifest
    pub fn to_generator(&self) -> Result<Generator> {
        let guards = self.resolve_guards()?;
        let selection = self.resolve_selection()?;
        Ok(Generator::new(selection, guards))
    }

    /// Guard symbols must be distinct C identifiers
    fn resolve_guards(&self) -> Result<Guards> {
        Guards::new(
            self.guards.header.as_str(),
            self.guards.implementation.as_str(),
        )
        .map_err(ManifestError::from)
    }

    /// Map selected names onto catalog entries
    fn resolve_selection(&self) -> Result<Selection> {
        let select = &self.select;

        if select.sizes.is_empty() {
            return Err(ManifestError::EmptySelection("sizes"));
        }
        if select.types.is_empty() {
            return Err(ManifestError::EmptySelection("types"));
        }
        if select.ops.is_empty() {
            return Err(ManifestError::EmptySelection("ops"));
        }

        let mut seen_sizes = HashSet::new();
        for &n in &select.sizes {
            if !seen_sizes.insert(n) {
                return Err(ManifestError::Duplicate("sizes", n.to_string()));
            }
        }

        let types = resolve_names("types", &select.types, |name| {
            ElementType::by_name(name).ok_or_else(|| ManifestError::UnknownType(name.to_string()))
        })?;
        let ops = resolve_names("ops", &select.ops, |name| {
            Operation::by_suffix(name)
                .ok_or_else(|| ManifestError::UnknownOperation(name.to_string()))
        })?;

        debug!(
            "Selection: sizes {:?}, {} types, {} operations",
            select.sizes,
            types.len(),
            ops.len()
        );

        Ok(Selection::new(select.sizes.iter().copied(), types, ops)?)
    }
}

fn resolve_names<T: 'static>(
    section: &'static str,
    names: &[String],
    lookup: impl Fn(&str) -> Result<&'static T>,
) -> Result<Vec<&'static T>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ManifestError::Duplicate(section, name.clone()));
        }
        resolved.push(lookup(name.as_str())?);
    }
    Ok(resolved)
}
