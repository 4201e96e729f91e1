//! Edit application and dependency-graph maintenance.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use cellgrid_engine::engine::{CellId, ErrorKind, Formula, Value, parse, references};
use tracing::debug;

use super::state::Sheet;

impl Sheet {
    /// Apply one edit and recompute everything it affects.
    ///
    /// Returns the committed value of every cell in the affected set (the
    /// edited cell plus the transitive closure of its dependents), in id
    /// order. An edit outside the grid commits nothing and returns `#REF!`
    /// for the edit site alone; nothing in this path can fail.
    pub fn apply_edit(&mut self, id: CellId, raw: &str) -> BTreeMap<CellId, Value> {
        if !self.bounds.contains(id) {
            debug!(cell = %id, "edit outside grid bounds");
            return BTreeMap::from([(id, Value::Error(ErrorKind::InvalidReference))]);
        }

        self.set_formula(id, raw);
        let affected = self.affected_set(id);
        debug!(cell = %id, affected = affected.len(), "edit applied");
        self.recompute(&affected)
    }

    /// Commit raw text and parsed formula at `id`, then repair the
    /// mirrored edges: the mirrored-edge invariant holds again before any
    /// evaluation runs.
    fn set_formula(&mut self, id: CellId, raw: &str) {
        let formula = parse(raw);
        let new_refs = match &formula {
            Formula::Expr(expr) => references(expr, self.bounds),
            _ => BTreeSet::new(),
        };

        let old_refs = {
            let mut entry = self.grid.entry(id).or_default();
            let cell = entry.value_mut();
            cell.raw = raw.to_string();
            cell.formula = formula;
            std::mem::replace(&mut cell.precedents, new_refs.clone())
        };

        for removed in old_refs.difference(&new_refs) {
            if let Some(mut cell) = self.grid.get_mut(removed) {
                cell.dependents.remove(&id);
            }
        }
        for added in new_refs.difference(&old_refs) {
            self.grid.entry(*added).or_default().dependents.insert(id);
        }
    }

    /// The edited cell plus the transitive closure of its dependents.
    pub(crate) fn affected_set(&self, start: CellId) -> BTreeSet<CellId> {
        let mut affected = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            let dependents = match self.grid.get(&id) {
                Some(cell) => cell.dependents.clone(),
                None => continue,
            };
            for dep in dependents {
                if affected.insert(dep) {
                    queue.push_back(dep);
                }
            }
        }

        affected
    }
}
