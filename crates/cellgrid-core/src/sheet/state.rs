//! Sheet state: the grid and its configured extent.

use std::collections::BTreeMap;

use cellgrid_engine::engine::{Bounds, CellId, ErrorKind, Grid, Value, format_value};

/// Read-only per-cell view returned by [`Sheet::snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub struct CellSnapshot {
    pub raw: String,
    pub value: Value,
}

/// The cell store.
///
/// Owns the grid exclusively: the presentation layer submits `(id, raw)`
/// edits through [`Sheet::apply_edit`] and reads values back from the
/// returned map or from [`Sheet::snapshot`]. Edits are synchronous and
/// non-reentrant; `&mut self` enforces the single-writer discipline at
/// compile time.
pub struct Sheet {
    pub(crate) grid: Grid,
    pub(crate) bounds: Bounds,
}

impl Sheet {
    pub fn new(bounds: Bounds) -> Sheet {
        let grid: Grid = dashmap::DashMap::new();
        Sheet { grid, bounds }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Committed value of a cell. Blank positions read as `Empty`,
    /// positions outside the grid as `#REF!`.
    pub fn value(&self, id: CellId) -> Value {
        if !self.bounds.contains(id) {
            return Value::Error(ErrorKind::InvalidReference);
        }
        self.grid
            .get(&id)
            .map(|cell| cell.value.clone())
            .unwrap_or_default()
    }

    /// Display string for a cell (empty for blanks).
    pub fn display(&self, id: CellId) -> String {
        format_value(&self.value(id))
    }

    /// The raw text last committed at `id` (empty for blanks).
    pub fn raw(&self, id: CellId) -> String {
        self.grid
            .get(&id)
            .map(|cell| cell.raw.clone())
            .unwrap_or_default()
    }

    /// Snapshot of every cell with non-blank raw text, for a full redraw.
    /// Positions absent from the map render as empty cells.
    pub fn snapshot(&self) -> BTreeMap<CellId, CellSnapshot> {
        self.grid
            .iter()
            .filter(|entry| !entry.value().raw.is_empty())
            .map(|entry| {
                (
                    *entry.key(),
                    CellSnapshot {
                        raw: entry.value().raw.clone(),
                        value: entry.value().value.clone(),
                    },
                )
            })
            .collect()
    }
}

impl Default for Sheet {
    fn default() -> Sheet {
        Sheet::new(Bounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> CellId {
        name.parse().unwrap()
    }

    #[test]
    fn test_untouched_cells_read_as_empty() {
        let sheet = Sheet::default();
        assert_eq!(sheet.value(id("M50")), Value::Empty);
        assert_eq!(sheet.display(id("M50")), "");
        assert_eq!(sheet.raw(id("M50")), "");
    }

    #[test]
    fn test_out_of_bounds_reads_as_invalid_reference() {
        let sheet = Sheet::new(Bounds::new(2, 2));
        assert_eq!(
            sheet.value(id("C1")),
            Value::Error(ErrorKind::InvalidReference)
        );
    }

    #[test]
    fn test_snapshot_lists_only_cells_with_raw_text() {
        let mut sheet = Sheet::default();
        sheet.apply_edit(id("A1"), "1");
        sheet.apply_edit(id("B1"), "=A1+1");
        sheet.apply_edit(id("C1"), "note");
        // Blanked cells drop out of the snapshot again.
        sheet.apply_edit(id("C1"), "");

        let snapshot = sheet.snapshot();
        assert_eq!(
            snapshot.keys().copied().collect::<Vec<_>>(),
            vec![id("A1"), id("B1")]
        );
        assert_eq!(snapshot[&id("B1")].raw, "=A1+1");
        assert_eq!(snapshot[&id("B1")].value, Value::Number(2.0));
    }
}
