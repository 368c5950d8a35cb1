//! Fixed element type and operation tables
//!
//! The generator enumerates over these tables in declaration order. Adding an
//! entry means touching the table, its kind enum and the count constant; the
//! const assertions below reject a partial edit at build time.
//!
//! A table whose length disagrees with its count constant does not compile:
//!
//! ```compile_fail
//! use lagen_codegen::catalog::{ElementType, COUNT_TYPES};
//!
//! static SHORT_DEFS: [ElementType; COUNT_TYPES] = [
//!     ElementType::new("float", "f"),
//!     ElementType::new("double", "d"),
//! ];
//! ```
//!
//! The same holds for the kind lists:
//!
//! ```compile_fail
//! use lagen_codegen::catalog::{OpKind, COUNT_OPS};
//!
//! const SHORT_KINDS: [OpKind; COUNT_OPS] = [OpKind::Sum, OpKind::Sub, OpKind::Mul];
//! ```

/// Scalar type stored in every component of a generated vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementType {
    /// C spelling of the scalar (`float`)
    pub name: &'static str,
    /// Token appended to derived names (`f`)
    pub suffix: &'static str,
}

impl ElementType {
    pub const fn new(name: &'static str, suffix: &'static str) -> Self {
        Self { name, suffix }
    }

    /// Look up a catalog entry by its C spelling
    pub fn by_name(name: &str) -> Option<&'static ElementType> {
        TYPE_DEFS.iter().find(|ty| ty.name == name)
    }
}

/// Component-wise binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    /// Token appended to the function name (`sum`)
    pub suffix: &'static str,
    /// In-place C operator applied per component (`+=`)
    pub op: &'static str,
}

impl Operation {
    pub const fn new(suffix: &'static str, op: &'static str) -> Self {
        Self { suffix, op }
    }

    /// Look up a catalog entry by its name suffix
    pub fn by_suffix(suffix: &str) -> Option<&'static Operation> {
        OP_DEFS.iter().find(|op| op.suffix == suffix)
    }
}

/// Slots of [`TYPE_DEFS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Float = 0,
    Double,
    Int,
}

impl TypeKind {
    pub const ALL: [TypeKind; COUNT_TYPES] = [TypeKind::Float, TypeKind::Double, TypeKind::Int];

    pub fn def(self) -> &'static ElementType {
        &TYPE_DEFS[self as usize]
    }
}

/// Slots of [`OP_DEFS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Sum = 0,
    Sub,
    Mul,
    Div,
}

impl OpKind {
    pub const ALL: [OpKind; COUNT_OPS] = [OpKind::Sum, OpKind::Sub, OpKind::Mul, OpKind::Div];

    pub fn def(self) -> &'static Operation {
        &OP_DEFS[self as usize]
    }
}

pub const COUNT_TYPES: usize = 3;
pub const COUNT_OPS: usize = 4;

const _: () = assert!(
    COUNT_TYPES == 3,
    "The amount of type definitions has changed. Update TYPE_DEFS and TypeKind accordingly"
);
const _: () = assert!(
    COUNT_OPS == 4,
    "The amount of operator definitions has changed. Update OP_DEFS and OpKind accordingly"
);
const _: () = {
    let mut i = 0;
    while i < COUNT_TYPES {
        assert!(TypeKind::ALL[i] as usize == i, "TypeKind::ALL must follow TYPE_DEFS");
        i += 1;
    }
    let mut i = 0;
    while i < COUNT_OPS {
        assert!(OpKind::ALL[i] as usize == i, "OpKind::ALL must follow OP_DEFS");
        i += 1;
    }
};

// Statics cannot be read in const context, so the build-time checks run
// over these and the public statics are initialized from them.
const TYPE_TABLE: [ElementType; COUNT_TYPES] = [
    ElementType::new("float", "f"),
    ElementType::new("double", "d"),
    ElementType::new("int", "i"),
];

const OP_TABLE: [Operation; COUNT_OPS] = [
    Operation::new("sum", "+="),
    Operation::new("sub", "-="),
    Operation::new("mul", "*="),
    Operation::new("div", "/="),
];

pub static TYPE_DEFS: [ElementType; COUNT_TYPES] = TYPE_TABLE;
pub static OP_DEFS: [Operation; COUNT_OPS] = OP_TABLE;

const _: () = assert!(
    type_suffixes_distinct(&TYPE_TABLE),
    "Element type suffixes must be distinct"
);
const _: () = assert!(
    op_suffixes_distinct(&OP_TABLE),
    "Operation suffixes must be distinct"
);

/// Component counts emitted by default (inclusive)
pub const MIN_COMPONENTS: usize = 2;
pub const MAX_COMPONENTS: usize = 4;

/// Widest vector a selection may ask for
pub const LIMIT_COMPONENTS: usize = 16;

const _: () = assert!(MIN_COMPONENTS >= 1 && MIN_COMPONENTS <= MAX_COMPONENTS);
const _: () = assert!(MAX_COMPONENTS <= LIMIT_COMPONENTS);

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn type_suffixes_distinct(defs: &[ElementType]) -> bool {
    let mut i = 0;
    while i < defs.len() {
        let mut j = i + 1;
        while j < defs.len() {
            if str_eq(defs[i].suffix, defs[j].suffix) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn op_suffixes_distinct(defs: &[Operation]) -> bool {
    let mut i = 0;
    while i < defs.len() {
        let mut j = i + 1;
        while j < defs.len() {
            if str_eq(defs[i].suffix, defs[j].suffix) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}
