//! The cell store: grid ownership, graph maintenance, recomputation.

mod eval;
mod ops;
mod state;

pub use state::{CellSnapshot, Sheet};
