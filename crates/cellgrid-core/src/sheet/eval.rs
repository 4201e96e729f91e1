//! Ordered recomputation of an affected set.
//!
//! Cells are re-evaluated precedents-first (Kahn's algorithm over the
//! precedent edges restricted to the affected set) and each result is
//! committed before the next cell runs, so later cells observe fresh
//! precedent values. When the schedule stalls, the remaining cells wait
//! on a reference cycle: the cells actually on a cycle become `#CIRC!`
//! without their expression being evaluated, and the schedule resumes so
//! cells downstream of the cycle inherit the error through lookup.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use cellgrid_engine::engine::{CellId, ErrorKind, Formula, Value, detect_cycle, evaluate_formula};
use tracing::{debug, trace};

use super::state::Sheet;

impl Sheet {
    pub(crate) fn recompute(&mut self, affected: &BTreeSet<CellId>) -> BTreeMap<CellId, Value> {
        let mut remaining = affected.clone();
        let mut indegree: HashMap<CellId, usize> = HashMap::with_capacity(affected.len());
        for &id in affected {
            let n = self
                .grid
                .get(&id)
                .map(|cell| {
                    cell.precedents
                        .iter()
                        .filter(|p| affected.contains(p))
                        .count()
                })
                .unwrap_or(0);
            indegree.insert(id, n);
        }

        // Ready cells drain in (row, col) order for deterministic results.
        let mut ready: BTreeSet<CellId> = remaining
            .iter()
            .copied()
            .filter(|id| indegree[id] == 0)
            .collect();
        let mut results = BTreeMap::new();

        while !remaining.is_empty() {
            if let Some(id) = ready.pop_first() {
                remaining.remove(&id);
                let value = self.evaluate_cell(id);
                trace!(cell = %id, value = ?value, "cell recomputed");
                self.commit(id, value.clone());
                results.insert(id, value);
                self.relax(id, &remaining, &mut indegree, &mut ready);
            } else {
                let members = self.stalled_cycle_members(&remaining);
                if members.is_empty() {
                    break;
                }
                for id in members {
                    remaining.remove(&id);
                    let value = Value::Error(ErrorKind::CircularReference);
                    self.commit(id, value.clone());
                    results.insert(id, value);
                    self.relax(id, &remaining, &mut indegree, &mut ready);
                }
            }
        }

        results
    }

    /// Interpret one cell's formula against committed precedent values.
    /// Never touches the graph: the lookup closure reads values only.
    fn evaluate_cell(&self, id: CellId) -> Value {
        let formula = match self.grid.get(&id) {
            Some(cell) => cell.formula.clone(),
            None => Formula::Empty,
        };
        let lookup = |rid: CellId| self.value(rid);
        evaluate_formula(&formula, &lookup)
    }

    fn commit(&mut self, id: CellId, value: Value) {
        self.grid.entry(id).or_default().value = value;
    }

    /// Unblock dependents of a cell whose value was just committed.
    fn relax(
        &self,
        id: CellId,
        remaining: &BTreeSet<CellId>,
        indegree: &mut HashMap<CellId, usize>,
        ready: &mut BTreeSet<CellId>,
    ) {
        let dependents = match self.grid.get(&id) {
            Some(cell) => cell.dependents.clone(),
            None => return,
        };
        for dep in dependents {
            if !remaining.contains(&dep) {
                continue;
            }
            if let Some(n) = indegree.get_mut(&dep) {
                *n = n.saturating_sub(1);
                if *n == 0 {
                    ready.insert(dep);
                }
            }
        }
    }

    /// The cells among a stalled remainder that sit on a reference cycle.
    /// Every stalled remainder contains at least one such cell.
    fn stalled_cycle_members(&self, remaining: &BTreeSet<CellId>) -> Vec<CellId> {
        let mut members = Vec::new();
        for &id in remaining {
            if let Some(path) = detect_cycle(id, &self.grid) {
                debug!(cell = %id, ?path, "circular reference");
                members.push(id);
            }
        }
        members
    }
}
