//! Two-phase header generation
//!
//! The driver walks component counts, then element types, then operations,
//! and writes the declarations section followed by the implementation
//! section. The enumeration order is part of the output contract: for a fixed
//! selection the generated text is byte-for-byte reproducible.

use crate::catalog::{
    ElementType, Operation, LIMIT_COMPONENTS, MAX_COMPONENTS, MIN_COMPONENTS, OP_DEFS, TYPE_DEFS,
};
use crate::emit::{
    emit_constructor, emit_operation, emit_scalar_constructor, emit_vector_typedef, EmitMode,
};
use crate::error::{CodegenError, Result};
use crate::naming::{symbols_for, Symbol};
use std::io::Write;
use tracing::{debug, info, trace};

/// Controlling symbol of the include guard around the declarations
pub const DEFAULT_HEADER_GUARD: &str = "LA_H_";

/// Symbol a single translation unit defines to get the function bodies
pub const DEFAULT_IMPLEMENTATION_GUARD: &str = "LA_IMPLEMENTATION";

/// Preprocessor symbols framing the two sections
///
/// Both are distinct C identifiers; [`Guards::new`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guards {
    header: String,
    implementation: String,
}

impl Guards {
    pub fn new(header: impl Into<String>, implementation: impl Into<String>) -> Result<Self> {
        let header = header.into();
        let implementation = implementation.into();

        validate_identifier(&header)?;
        validate_identifier(&implementation)?;

        if header == implementation {
            return Err(CodegenError::InvalidGuard {
                symbol: implementation,
                reason: "header and implementation guards must differ".to_string(),
            });
        }

        Ok(Self {
            header,
            implementation,
        })
    }

    /// Include guard around the declarations
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Symbol enabling the function bodies
    pub fn implementation(&self) -> &str {
        &self.implementation
    }
}

impl Default for Guards {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER_GUARD.to_string(),
            implementation: DEFAULT_IMPLEMENTATION_GUARD.to_string(),
        }
    }
}

/// The part of the catalog a run enumerates
///
/// Component counts are kept ascending and types and operations in catalog
/// declaration order, however the selection was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    sizes: Vec<usize>,
    types: Vec<&'static ElementType>,
    ops: Vec<&'static Operation>,
}

impl Selection {
    /// Every catalog entry over the default component range
    pub fn full() -> Self {
        Self {
            sizes: (MIN_COMPONENTS..=MAX_COMPONENTS).collect(),
            types: TYPE_DEFS.iter().collect(),
            ops: OP_DEFS.iter().collect(),
        }
    }

    /// Build a selection from catalog entries, normalizing to enumeration order
    ///
    /// Every component count must lie in `1..=LIMIT_COMPONENTS`. Entries that
    /// are not part of the static catalog tables are ignored.
    pub fn new(
        sizes: impl IntoIterator<Item = usize>,
        types: impl IntoIterator<Item = &'static ElementType>,
        ops: impl IntoIterator<Item = &'static Operation>,
    ) -> Result<Self> {
        let mut sizes: Vec<usize> = sizes.into_iter().collect();
        if let Some(&count) = sizes.iter().find(|n| !(1..=LIMIT_COMPONENTS).contains(*n)) {
            return Err(CodegenError::ComponentCount {
                count,
                min: 1,
                max: LIMIT_COMPONENTS,
            });
        }
        sizes.sort_unstable();
        sizes.dedup();

        let types: Vec<&'static ElementType> = types.into_iter().collect();
        let ops: Vec<&'static Operation> = ops.into_iter().collect();

        Ok(Self {
            sizes,
            types: TYPE_DEFS
                .iter()
                .filter(|def| types.iter().any(|t| std::ptr::eq(*t, *def)))
                .collect(),
            ops: OP_DEFS
                .iter()
                .filter(|def| ops.iter().any(|o| std::ptr::eq(*o, *def)))
                .collect(),
        })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn types(&self) -> &[&'static ElementType] {
        &self.types
    }

    pub fn ops(&self) -> &[&'static Operation] {
        &self.ops
    }

    /// `(count, type)` pairs in emission order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, &'static ElementType)> + '_ {
        self.sizes
            .iter()
            .flat_map(move |&n| self.types.iter().map(move |&ty| (n, ty)))
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::full()
    }
}

/// Counts of emitted units, for logging and sanity checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub type_definitions: usize,
    pub declarations: usize,
    pub definitions: usize,
}

/// Header generator over a selection of the catalog
#[derive(Debug, Clone, Default)]
pub struct Generator {
    selection: Selection,
    guards: Guards,
}

impl Generator {
    pub fn new(selection: Selection, guards: Guards) -> Self {
        Self { selection, guards }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn guards(&self) -> &Guards {
        &self.guards
    }

    /// Write the complete header: declarations section, then implementation section
    pub fn generate<W: Write>(&self, out: &mut W) -> Result<GenerationReport> {
        info!(
            "Generating vector header: {} sizes x {} types x {} operations",
            self.selection.sizes.len(),
            self.selection.types.len(),
            self.selection.ops.len()
        );

        let mut report = GenerationReport::default();
        self.generate_declarations(out, &mut report)?;
        self.generate_definitions(out, &mut report)?;
        out.flush()?;

        info!(
            "Emitted {} types, {} declarations, {} definitions",
            report.type_definitions, report.declarations, report.definitions
        );
        Ok(report)
    }

    /// Render the header into a string
    pub fn generate_to_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.generate(&mut buf)?;
        // Every emitted fragment comes from `&str` data, so the buffer is UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Every public name of the generated header, in declaration order
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        let mut symbols = Vec::new();
        for (n, ty) in self.selection.pairs() {
            symbols.extend(symbols_for(n, ty, &self.selection.ops)?);
        }
        Ok(symbols)
    }

    fn generate_declarations<W: Write>(
        &self,
        out: &mut W,
        report: &mut GenerationReport,
    ) -> Result<()> {
        debug!("Declarations section (guard {})", self.guards.header);

        writeln!(out, "#ifndef {}", self.guards.header)?;
        writeln!(out, "#define {}", self.guards.header)?;
        writeln!(out)?;

        for (n, ty) in self.selection.pairs() {
            trace!("Declaring {}-component {} vector", n, ty.name);

            emit_vector_typedef(out, n, ty)?;
            report.type_definitions += 1;

            for op in &self.selection.ops {
                emit_operation(out, EmitMode::Declaration, n, ty, op)?;
            }
            emit_constructor(out, EmitMode::Declaration, n, ty)?;
            emit_scalar_constructor(out, EmitMode::Declaration, n, ty)?;
            report.declarations += self.selection.ops.len() + 2;

            writeln!(out)?;
        }

        writeln!(out, "#endif // {}", self.guards.header)?;
        writeln!(out)?;
        Ok(())
    }

    fn generate_definitions<W: Write>(
        &self,
        out: &mut W,
        report: &mut GenerationReport,
    ) -> Result<()> {
        debug!("Definitions section (guard {})", self.guards.implementation);

        writeln!(out, "#ifdef {}", self.guards.implementation)?;
        writeln!(out)?;

        for (n, ty) in self.selection.pairs() {
            trace!("Defining {}-component {} vector", n, ty.name);

            for op in &self.selection.ops {
                emit_operation(out, EmitMode::Definition, n, ty, op)?;
            }
            writeln!(out)?;
            emit_constructor(out, EmitMode::Definition, n, ty)?;
            writeln!(out)?;
            emit_scalar_constructor(out, EmitMode::Definition, n, ty)?;
            writeln!(out)?;
            report.definitions += self.selection.ops.len() + 2;
        }

        writeln!(out, "#endif // {}", self.guards.implementation)?;
        Ok(())
    }
}

/// Check that `symbol` can be used with `#ifndef`/`#define`
pub fn validate_identifier(symbol: &str) -> Result<()> {
    let invalid = |reason: &str| CodegenError::InvalidGuard {
        symbol: symbol.to_string(),
        reason: reason.to_string(),
    };
    let mut chars = symbol.chars();

    match chars.next() {
        None => return Err(invalid("guard symbol cannot be empty")),
        Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
            return Err(invalid("must start with a letter or underscore"));
        }
        Some(_) => {}
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(
            "can only contain ASCII letters, digits, and underscores",
        ));
    }

    Ok(())
}

/// Generate the default header (full catalog, default guards) into `out`
pub fn generate_library<W: Write>(out: &mut W) -> Result<GenerationReport> {
    Generator::default().generate(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{OpKind, TypeKind};

    #[test]
    fn test_full_selection() {
        let selection = Selection::full();
        assert_eq!(selection.sizes(), &[2, 3, 4]);
        assert_eq!(selection.types().len(), 3);
        assert_eq!(selection.ops().len(), 4);
        assert_eq!(selection.pairs().count(), 9);
    }

    #[test]
    fn test_selection_normalizes_order() {
        let selection = Selection::new(
            [4, 2, 4],
            [TypeKind::Int.def(), TypeKind::Float.def()],
            [OpKind::Div.def(), OpKind::Sum.def()],
        )
        .unwrap();
        assert_eq!(selection.sizes(), &[2, 4]);
        let types: Vec<_> = selection.types().iter().map(|t| t.name).collect();
        assert_eq!(types, ["float", "int"]);
        let ops: Vec<_> = selection.ops().iter().map(|o| o.suffix).collect();
        assert_eq!(ops, ["sum", "div"]);
    }

    #[test]
    fn test_pairs_order() {
        let pairs: Vec<_> = Selection::full()
            .pairs()
            .map(|(n, ty)| format!("{}{}", n, ty.suffix))
            .collect();
        assert_eq!(
            pairs,
            ["2f", "2d", "2i", "3f", "3d", "3i", "4f", "4d", "4i"]
        );
    }

    #[test]
    fn test_report_counts() {
        let mut sink = Vec::new();
        let report = generate_library(&mut sink).unwrap();
        assert_eq!(
            report,
            GenerationReport {
                type_definitions: 9,
                declarations: 9 * 6,
                definitions: 9 * 6,
            }
        );
    }

    #[test]
    fn test_framing() {
        let text = Generator::default().generate_to_string().unwrap();
        assert!(text.starts_with("#ifndef LA_H_\n#define LA_H_\n\n"));
        assert!(text.contains("\n#endif // LA_H_\n\n#ifdef LA_IMPLEMENTATION\n\n"));
        assert!(text.ends_with("\n#endif // LA_IMPLEMENTATION\n"));
    }

    #[test]
    fn test_custom_guards() {
        let guards = Guards::new("VEC_H", "VEC_IMPL").unwrap();
        let generator = Generator::new(Selection::full(), guards);
        let text = generator.generate_to_string().unwrap();
        assert!(text.starts_with("#ifndef VEC_H\n#define VEC_H\n"));
        assert!(text.contains("#endif // VEC_H\n\n#ifdef VEC_IMPL\n"));
        assert!(!text.contains("LA_H_"));
    }

    #[test]
    fn test_symbols_follow_selection() {
        let generator = Generator::new(
            Selection::new([3], [TypeKind::Double.def()], [OpKind::Sum.def()]).unwrap(),
            Guards::default(),
        );
        let names: Vec<_> = generator
            .symbols()
            .unwrap()
            .into_iter()
            .map(|s| s.name.to_string())
            .collect();
        assert_eq!(names, ["V3d", "v3d_sum", "v3d", "v3ds"]);
    }

    #[test]
    fn test_component_count_out_of_range() {
        for count in [0, LIMIT_COMPONENTS + 1] {
            let err = Selection::new([2, count], TYPE_DEFS.iter(), OP_DEFS.iter()).unwrap_err();
            assert!(
                matches!(
                    err,
                    CodegenError::ComponentCount { count: c, min: 1, max: LIMIT_COMPONENTS }
                        if c == count
                ),
                "{:?}",
                err
            );
        }

        let widest = Selection::new([1, LIMIT_COMPONENTS], TYPE_DEFS.iter(), OP_DEFS.iter());
        assert_eq!(widest.unwrap().sizes(), &[1, LIMIT_COMPONENTS]);
    }

    #[test]
    fn test_identifier_rules() {
        assert!(validate_identifier("LA_H_").is_ok());
        assert!(validate_identifier("_private9").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("9LIVES").is_err());
        assert!(validate_identifier("MY-GUARD").is_err());
        assert!(validate_identifier("GUARD H").is_err());
    }

    #[test]
    fn test_invalid_guards_rejected() {
        assert!(matches!(
            Guards::new("", "LA_IMPLEMENTATION"),
            Err(CodegenError::InvalidGuard { ref symbol, .. }) if symbol.is_empty()
        ));
        assert!(matches!(
            Guards::new("LA_H_", "la.impl"),
            Err(CodegenError::InvalidGuard { ref symbol, .. }) if symbol == "la.impl"
        ));
        assert!(matches!(
            Guards::new("SAME", "SAME"),
            Err(CodegenError::InvalidGuard { .. })
        ));
        assert_eq!(Guards::new("LA_H_", "LA_IMPLEMENTATION").unwrap(), Guards::default());
    }
}
