//! Derived names for generated types and functions
//!
//! Every name the generated header exposes is recomputed from
//! `(component count, element type)` at each use site. Declarations and
//! definitions call the same functions, so the two can never disagree.

use crate::catalog::{ElementType, Operation};
use crate::error::Result;
use crate::short_format;
use crate::short_string::ShortString;

/// Aggregate type name, `V` + count + suffix (`V3f`)
pub fn vector_type(n: usize, ty: &ElementType) -> Result<ShortString> {
    short_format!("V{}{}", n, ty.suffix)
}

/// Function name prefix, `v` + count + suffix (`v3f`)
///
/// The prefix alone names the full constructor.
pub fn vector_prefix(n: usize, ty: &ElementType) -> Result<ShortString> {
    short_format!("v{}{}", n, ty.suffix)
}

/// Component-wise operation function (`v3f_sum`)
pub fn op_function(n: usize, ty: &ElementType, op: &Operation) -> Result<ShortString> {
    short_format!("{}_{}", vector_prefix(n, ty)?, op.suffix)
}

/// Scalar-broadcast constructor (`v3fs`)
pub fn scalar_ctor_function(n: usize, ty: &ElementType) -> Result<ShortString> {
    short_format!("{}s", vector_prefix(n, ty)?)
}

/// Name of the full constructor's `i`-th parameter (`x0`, `x1`, ...)
pub fn ctor_param(i: usize) -> Result<ShortString> {
    short_format!("x{}", i)
}

/// Field array inside every generated aggregate
pub const FIELD_ARRAY: &str = "c";

/// Parameter of the scalar-broadcast constructor
pub const SCALAR_PARAM: &str = "x";

/// Operands of a binary operation; the result is written back into the left one
pub const LHS_OPERAND: &str = "a";
pub const RHS_OPERAND: &str = "b";

/// What a public name in the generated header refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Type,
    Operation,
    Constructor,
    ScalarConstructor,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Type => "type",
            SymbolKind::Operation => "operation",
            SymbolKind::Constructor => "constructor",
            SymbolKind::ScalarConstructor => "scalar-constructor",
        }
    }
}

/// One entry of the naming surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: ShortString,
    /// Vector type the symbol belongs to (equal to `name` for types)
    pub type_name: ShortString,
}

/// All symbols for one `(count, type)` pair, in header declaration order
pub fn symbols_for(n: usize, ty: &ElementType, ops: &[&Operation]) -> Result<Vec<Symbol>> {
    let type_name = vector_type(n, ty)?;
    let mut symbols = Vec::with_capacity(ops.len() + 3);

    symbols.push(Symbol {
        kind: SymbolKind::Type,
        name: type_name,
        type_name,
    });
    for op in ops {
        symbols.push(Symbol {
            kind: SymbolKind::Operation,
            name: op_function(n, ty, op)?,
            type_name,
        });
    }
    symbols.push(Symbol {
        kind: SymbolKind::Constructor,
        name: vector_prefix(n, ty)?,
        type_name,
    });
    symbols.push(Symbol {
        kind: SymbolKind::ScalarConstructor,
        name: scalar_ctor_function(n, ty)?,
        type_name,
    });

    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{OpKind, TypeKind, OP_DEFS};

    #[test]
    fn test_type_names() {
        assert_eq!(vector_type(3, TypeKind::Float.def()).unwrap(), "V3f");
        assert_eq!(vector_type(2, TypeKind::Int.def()).unwrap(), "V2i");
        assert_eq!(vector_type(4, TypeKind::Double.def()).unwrap(), "V4d");
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(vector_prefix(3, TypeKind::Float.def()).unwrap(), "v3f");
        assert_eq!(vector_prefix(16, TypeKind::Int.def()).unwrap(), "v16i");
    }

    #[test]
    fn test_function_names() {
        let f = TypeKind::Float.def();
        assert_eq!(op_function(3, f, OpKind::Sum.def()).unwrap(), "v3f_sum");
        assert_eq!(op_function(2, f, OpKind::Div.def()).unwrap(), "v2f_div");
        assert_eq!(scalar_ctor_function(4, f).unwrap(), "v4fs");
        assert_eq!(ctor_param(0).unwrap(), "x0");
        assert_eq!(ctor_param(11).unwrap(), "x11");
    }

    #[test]
    fn test_derivation_is_repeatable() {
        let d = TypeKind::Double.def();
        assert_eq!(vector_type(3, d).unwrap(), vector_type(3, d).unwrap());
        assert_eq!(
            op_function(3, d, OpKind::Mul.def()).unwrap(),
            op_function(3, d, OpKind::Mul.def()).unwrap()
        );
    }

    #[test]
    fn test_symbols_for_pair() {
        let ops: Vec<_> = OP_DEFS.iter().collect();
        let symbols = symbols_for(2, TypeKind::Int.def(), &ops).unwrap();
        let names: Vec<_> = symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["V2i", "v2i_sum", "v2i_sub", "v2i_mul", "v2i_div", "v2i", "v2is"]
        );
        assert!(symbols.iter().all(|s| s.type_name == "V2i"));
        assert_eq!(symbols[0].kind, SymbolKind::Type);
        assert_eq!(symbols[6].kind, SymbolKind::ScalarConstructor);
    }
}
