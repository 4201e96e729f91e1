//! Error types for cellgrid core.
//!
//! These cover misuse of the store's textual surface (bad cell ids, bad
//! driver statements). Formula and evaluation failures are never errors
//! here: they are ordinary cell values (`#PARSE!`, `#DIV/0!`, ...).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid cell reference: {0}")]
    InvalidCellId(String),

    #[error("Malformed statement: {0}")]
    BadStatement(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
