//! Cell engine API.
//!
//! This module provides the computation core for the spreadsheet:
//!
//! - [`CellId`] - Cell addressing (A1 notation ↔ column/row indices)
//! - [`Cell`], [`Grid`], [`Bounds`] - Grid storage and the mirrored
//!   dependency edge sets
//! - [`Formula`], [`Expr`] - Parsed formula representation
//! - [`parse`] - Total parsing of raw cell text
//! - [`references`] - Reference extraction for the dependency graph
//! - [`detect_cycle`] - Circular reference detection
//! - [`evaluate`] - Expression evaluation over committed values
//! - [`format_value`] - Format values for display

mod ast;
mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;
mod parser;
mod value;

pub use ast::{BinOp, Expr, Formula};
pub use cell::{Bounds, Cell, Grid};
pub use cell_ref::CellId;
pub use cycle::detect_cycle;
pub use deps::{MAX_RANGE_CELLS, expand_range, references};
pub use eval::{Lookup, evaluate, evaluate_formula};
pub use format::{format_number, format_value};
pub use parser::{parse, parse_expr};
pub use value::{ErrorKind, Value};
