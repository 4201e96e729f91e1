//! Reference extraction from parsed formulas.
//!
//! Walks an expression tree and collects every cell the formula reads
//! from, with range references flattened row-major into individual ids.
//! This is what the dependency graph consumes: out-of-bounds references
//! are skipped (they surface as `#REF!` at evaluation, never as edges).

use std::collections::BTreeSet;

use super::ast::Expr;
use super::cell::Bounds;
use super::cell_ref::CellId;

/// Upper limit on the number of cells a single range may flatten to.
/// Ranges over the limit contribute no edges and evaluate to `#REF!`.
pub const MAX_RANGE_CELLS: usize = 1_000_000;

/// Collect the in-bounds cell ids an expression directly references.
pub fn references(expr: &Expr, bounds: Bounds) -> BTreeSet<CellId> {
    let mut refs = BTreeSet::new();
    collect(expr, bounds, &mut refs);
    refs
}

fn collect(expr: &Expr, bounds: Bounds, out: &mut BTreeSet<CellId>) {
    match expr {
        Expr::Number(_) | Expr::Invalid(_) => {}
        Expr::Ref(id) => {
            if bounds.contains(*id) {
                out.insert(*id);
            }
        }
        Expr::Range(a, b) => {
            for id in expand_range(*a, *b).unwrap_or_default() {
                if bounds.contains(id) {
                    out.insert(id);
                }
            }
        }
        Expr::Neg(inner) => collect(inner, bounds, out),
        Expr::Binary { lhs, rhs, .. } => {
            collect(lhs, bounds, out);
            collect(rhs, bounds, out);
        }
        Expr::Call { args, .. } => {
            for arg in args {
                collect(arg, bounds, out);
            }
        }
    }
}

/// Flatten a range row-major into individual cell ids, normalizing the
/// corners. Returns None for ranges over [`MAX_RANGE_CELLS`].
pub fn expand_range(a: CellId, b: CellId) -> Option<Vec<CellId>> {
    let min_row = a.row.min(b.row);
    let max_row = a.row.max(b.row);
    let min_col = a.col.min(b.col);
    let max_col = a.col.max(b.col);

    let row_count = max_row - min_row + 1;
    let col_count = max_col - min_col + 1;
    let cell_count = row_count.checked_mul(col_count)?;
    if cell_count > MAX_RANGE_CELLS {
        return None;
    }

    let mut cells = Vec::with_capacity(cell_count);
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            cells.push(CellId::new(col, row));
        }
    }
    Some(cells)
}
