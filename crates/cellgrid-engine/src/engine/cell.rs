//! Cell data structures for the spreadsheet grid.
//!
//! - [`Bounds`] - the configured grid extent
//! - [`Cell`] - raw text, parsed formula, committed value, and the two
//!   mirrored edge sets of the dependency graph
//! - [`Grid`] - sparse storage for cells (backed by `DashMap`)

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ast::Formula;
use super::cell_ref::CellId;
use super::parser::parse;
use super::value::Value;

/// The configured extent of the grid (columns × rows). References outside
/// it never become graph edges and read as `#REF!`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub cols: usize,
    pub rows: usize,
}

impl Bounds {
    pub fn new(cols: usize, rows: usize) -> Bounds {
        Bounds { cols, rows }
    }

    pub fn contains(&self, id: CellId) -> bool {
        id.col < self.cols && id.row < self.rows
    }
}

impl Default for Bounds {
    /// The classic 26-column, 100-row sheet.
    fn default() -> Bounds {
        Bounds::new(26, 100)
    }
}

/// One grid position.
///
/// Invariant (mirrored edges): for all cells X and Y,
/// `Y ∈ X.dependents ⇔ X ∈ Y.precedents`. `precedents` is derived from
/// this cell's own formula; `dependents` is mutated only by neighbors
/// re-parsing, never by the cell itself.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cell {
    /// The exact text the user typed (empty string = blank cell).
    pub raw: String,
    pub formula: Formula,
    /// The last committed display value.
    pub value: Value,
    pub precedents: BTreeSet<CellId>,
    pub dependents: BTreeSet<CellId>,
}

impl Cell {
    /// Parse user input into a cell. The value stays `Empty` until the
    /// store's recompute pass commits one.
    pub fn from_raw(raw: &str) -> Cell {
        Cell {
            raw: raw.to_string(),
            formula: parse(raw),
            ..Cell::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.formula, Formula::Empty)
    }
}

/// Sparse grid storage. A cell exists implicitly at every in-bounds
/// position and is materialized on first touch (an edit, or a neighbor's
/// first incoming edge).
pub type Grid = DashMap<CellId, Cell>;
