//! lagen code generation
//!
//! This crate turns a fixed catalog of element types and component-wise
//! operations into a single-header C vector library:
//! - `catalog`: the element type and operation tables
//! - `naming`: derived type and function names
//! - `emit`: one emitter per syntactic unit
//! - `driver`: enumeration order and the declarations/implementation sections
//!
//! ```
//! let header = lagen_codegen::Generator::default().generate_to_string().unwrap();
//! assert!(header.contains("V3f v3f_sum(V3f a, V3f b);"));
//! ```

pub mod catalog;
pub mod driver;
pub mod emit;
pub mod error;
pub mod naming;
pub mod short_string;

pub use catalog::{ElementType, OpKind, Operation, TypeKind, OP_DEFS, TYPE_DEFS};
pub use driver::{generate_library, GenerationReport, Generator, Guards, Selection};
pub use emit::EmitMode;
pub use error::{CodegenError, Result};
pub use naming::{Symbol, SymbolKind};
pub use short_string::ShortString;
