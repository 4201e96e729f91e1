//! Parsed formula representation.
//!
//! A closed tagged union: the evaluator is one exhaustive match over
//! [`Expr`], so every formula shape is handled at compile time.

use serde::{Deserialize, Serialize};

use super::cell_ref::CellId;
use super::value::ErrorKind;

/// The parsed form of a cell's raw text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Formula {
    /// Blank cell.
    #[default]
    Empty,
    /// Raw text without `=` that parses as a number.
    Number(f64),
    /// Any other raw text without `=`.
    Text(String),
    /// Raw text beginning with `=`.
    Expr(Expr),
}

/// Binary arithmetic operators, standard precedence, left-associative.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// An expression tree node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Number(f64),
    Ref(CellId),
    /// Rectangular span; corners are kept in source order and normalized
    /// when the range is flattened.
    Range(CellId, CellId),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Function call; the name is stored uppercase.
    Call { name: String, args: Vec<Expr> },
    /// Sentinel for malformed expression or reference text. Keeps parsing
    /// total; evaluates to its error kind.
    Invalid(ErrorKind),
}
