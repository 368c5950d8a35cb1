//! C text emitters, one per syntactic unit
//!
//! Each function writes a single unit straight to the sink. Function-like
//! units share one signature writer between their declaration and their
//! definition, selected with [`EmitMode`].

use crate::catalog::{ElementType, Operation};
use crate::error::Result;
use crate::naming::{
    ctor_param, op_function, scalar_ctor_function, vector_prefix, vector_type, FIELD_ARRAY,
    LHS_OPERAND, RHS_OPERAND, SCALAR_PARAM,
};
use std::io::Write;

const INDENT: &str = "    ";

/// Whether a function-like unit is written as a prototype or with its body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    /// Signature followed by `;`
    Declaration,
    /// Signature followed by a braced body
    Definition,
}

/// `typedef struct { float c[3]; } V3f;`
pub fn emit_vector_typedef<W: Write>(out: &mut W, n: usize, ty: &ElementType) -> Result<()> {
    writeln!(
        out,
        "typedef struct {{ {} {}[{}]; }} {};",
        ty.name,
        FIELD_ARRAY,
        n,
        vector_type(n, ty)?
    )?;
    Ok(())
}

/// Component-wise binary operation, `V3f v3f_sum(V3f a, V3f b)`
pub fn emit_operation<W: Write>(
    out: &mut W,
    mode: EmitMode,
    n: usize,
    ty: &ElementType,
    op: &Operation,
) -> Result<()> {
    write_operation_signature(out, n, ty, op)?;
    match mode {
        EmitMode::Declaration => end_declaration(out),
        EmitMode::Definition => write_operation_body(out, n, op),
    }
}

/// Full constructor taking one scalar per component, `V3f v3f(float x0, float x1, float x2)`
pub fn emit_constructor<W: Write>(
    out: &mut W,
    mode: EmitMode,
    n: usize,
    ty: &ElementType,
) -> Result<()> {
    write_constructor_signature(out, n, ty)?;
    match mode {
        EmitMode::Declaration => end_declaration(out),
        EmitMode::Definition => write_constructor_body(out, n, ty),
    }
}

/// Scalar-broadcast constructor, `V3f v3fs(float x)`
pub fn emit_scalar_constructor<W: Write>(
    out: &mut W,
    mode: EmitMode,
    n: usize,
    ty: &ElementType,
) -> Result<()> {
    write_scalar_constructor_signature(out, n, ty)?;
    match mode {
        EmitMode::Declaration => end_declaration(out),
        EmitMode::Definition => write_scalar_constructor_body(out, n, ty),
    }
}

fn end_declaration<W: Write>(out: &mut W) -> Result<()> {
    out.write_all(b";\n")?;
    Ok(())
}

fn write_operation_signature<W: Write>(
    out: &mut W,
    n: usize,
    ty: &ElementType,
    op: &Operation,
) -> Result<()> {
    let type_name = vector_type(n, ty)?;
    write!(
        out,
        "{} {}({} {}, {} {})",
        type_name,
        op_function(n, ty, op)?,
        type_name,
        LHS_OPERAND,
        type_name,
        RHS_OPERAND
    )?;
    Ok(())
}

fn write_operation_body<W: Write>(out: &mut W, n: usize, op: &Operation) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{{")?;
    writeln!(
        out,
        "{INDENT}for (int i = 0; i < {n}; ++i) {lhs}.{c}[i] {op} {rhs}.{c}[i];",
        lhs = LHS_OPERAND,
        rhs = RHS_OPERAND,
        c = FIELD_ARRAY,
        op = op.op,
    )?;
    writeln!(out, "{INDENT}return {};", LHS_OPERAND)?;
    writeln!(out, "}}")?;
    Ok(())
}

fn write_constructor_signature<W: Write>(out: &mut W, n: usize, ty: &ElementType) -> Result<()> {
    write!(out, "{} {}(", vector_type(n, ty)?, vector_prefix(n, ty)?)?;
    for i in 0..n {
        if i > 0 {
            write!(out, ", ")?;
        }
        write!(out, "{} {}", ty.name, ctor_param(i)?)?;
    }
    write!(out, ")")?;
    Ok(())
}

fn write_constructor_body<W: Write>(out: &mut W, n: usize, ty: &ElementType) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{{")?;
    writeln!(out, "{INDENT}{} result;", vector_type(n, ty)?)?;
    for i in 0..n {
        writeln!(
            out,
            "{INDENT}result.{}[{}] = {};",
            FIELD_ARRAY,
            i,
            ctor_param(i)?
        )?;
    }
    writeln!(out, "{INDENT}return result;")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn write_scalar_constructor_signature<W: Write>(
    out: &mut W,
    n: usize,
    ty: &ElementType,
) -> Result<()> {
    write!(
        out,
        "{} {}({} {})",
        vector_type(n, ty)?,
        scalar_ctor_function(n, ty)?,
        ty.name,
        SCALAR_PARAM
    )?;
    Ok(())
}

/// Delegates to the full constructor with the scalar repeated once per component
fn write_scalar_constructor_body<W: Write>(out: &mut W, n: usize, ty: &ElementType) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{{")?;
    write!(out, "{INDENT}return {}(", vector_prefix(n, ty)?)?;
    for i in 0..n {
        if i > 0 {
            write!(out, ", ")?;
        }
        write!(out, "{}", SCALAR_PARAM)?;
    }
    writeln!(out, ");")?;
    writeln!(out, "}}")?;
    Ok(())
}
