//! Circular reference detection.
//!
//! A cell participates in a cycle when it can reach itself through
//! `precedents` edges (e.g., A1 references B1 and B1 references A1). The
//! store checks this per cell when a recompute pass stalls, so only the
//! cells on the cycle are marked `#CIRC!` while cells downstream of the
//! cycle inherit the error through normal evaluation.

use std::collections::HashSet;

use super::cell::Grid;
use super::cell_ref::CellId;

/// Detect whether `start` participates in a reference cycle.
/// Returns Some(path) from `start` back to itself, None otherwise.
pub fn detect_cycle(start: CellId, grid: &Grid) -> Option<Vec<CellId>> {
    let mut visited = HashSet::new();
    let mut path = vec![start];

    if dfs(start, start, grid, &mut visited, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn dfs(
    current: CellId,
    start: CellId,
    grid: &Grid,
    visited: &mut HashSet<CellId>,
    path: &mut Vec<CellId>,
) -> bool {
    let precedents = match grid.get(&current) {
        Some(cell) => cell.precedents.clone(),
        None => return false,
    };

    for p in precedents {
        if p == start {
            path.push(p);
            return true;
        }
        if visited.insert(p) {
            path.push(p);
            if dfs(p, start, grid, visited, path) {
                return true;
            }
            path.pop();
        }
    }

    false
}
