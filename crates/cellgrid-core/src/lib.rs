//! cellgrid-core - UI-agnostic cell store built on cellgrid-engine.

pub mod error;
pub mod script;
pub mod sheet;

pub use error::{CoreError, Result};
pub use sheet::{CellSnapshot, Sheet};

pub use cellgrid_engine::engine::{Bounds, CellId, ErrorKind, Value};
