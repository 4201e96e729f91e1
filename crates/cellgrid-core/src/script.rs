//! Driver statements.
//!
//! The line-oriented language the CLI collaborator speaks:
//!
//! - `A1=text` - apply an edit; everything after the first `=` is the raw
//!   cell text, so `B2==A1+1` stores the formula `=A1+1`.
//! - `?A1` - print one display value.
//! - `?` - dump the sheet snapshot, one `id = raw => value` line per cell.
//!
//! Statements are separated by newlines or semicolons; blank statements
//! are skipped. Cell ids are case-insensitive.

use cellgrid_engine::engine::{CellId, format_value};

use crate::error::{CoreError, Result};
use crate::sheet::Sheet;

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Edit { id: CellId, raw: String },
    Query(CellId),
    Dump,
}

pub fn parse_statement(input: &str) -> Result<Statement> {
    let stmt = input.trim();

    if let Some(rest) = stmt.strip_prefix('?') {
        let rest = rest.trim();
        if rest.is_empty() {
            return Ok(Statement::Dump);
        }
        let id = rest
            .parse()
            .map_err(|_| CoreError::InvalidCellId(rest.to_string()))?;
        return Ok(Statement::Query(id));
    }

    let Some((target, raw)) = stmt.split_once('=') else {
        return Err(CoreError::BadStatement(stmt.to_string()));
    };
    let target = target.trim();
    let id = target
        .parse()
        .map_err(|_| CoreError::InvalidCellId(target.to_string()))?;
    Ok(Statement::Edit {
        id,
        raw: raw.to_string(),
    })
}

/// Execute one statement; queries and dumps push their output lines.
pub fn execute(sheet: &mut Sheet, statement: &Statement, out: &mut Vec<String>) {
    match statement {
        Statement::Edit { id, raw } => {
            sheet.apply_edit(*id, raw);
        }
        Statement::Query(id) => out.push(sheet.display(*id)),
        Statement::Dump => {
            for (id, cell) in sheet.snapshot() {
                out.push(format!("{} = {} => {}", id, cell.raw, format_value(&cell.value)));
            }
        }
    }
}

/// Run a `;`/newline-separated script, returning the printed lines.
pub fn run_script(sheet: &mut Sheet, src: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for piece in src.split(|c| c == ';' || c == '\n') {
        if piece.trim().is_empty() {
            continue;
        }
        let statement = parse_statement(piece)?;
        execute(sheet, &statement, &mut out);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> CellId {
        name.parse().unwrap()
    }

    #[test]
    fn test_parse_statement_forms() {
        assert_eq!(
            parse_statement("A1=5").unwrap(),
            Statement::Edit {
                id: id("A1"),
                raw: "5".into()
            }
        );
        assert_eq!(
            parse_statement("b2==A1+1").unwrap(),
            Statement::Edit {
                id: id("B2"),
                raw: "=A1+1".into()
            }
        );
        assert_eq!(parse_statement(" ?C3 ").unwrap(), Statement::Query(id("C3")));
        assert_eq!(parse_statement("?").unwrap(), Statement::Dump);
    }

    #[test]
    fn test_parse_statement_rejects_garbage() {
        assert!(matches!(
            parse_statement("frobnicate"),
            Err(CoreError::BadStatement(_))
        ));
        assert!(matches!(
            parse_statement("12=5"),
            Err(CoreError::InvalidCellId(_))
        ));
        assert!(matches!(
            parse_statement("?notacell"),
            Err(CoreError::InvalidCellId(_))
        ));
    }

    #[test]
    fn test_run_script_applies_edits_and_queries() {
        let mut sheet = Sheet::default();
        let out = run_script(&mut sheet, "A1=1; B1==A1+1; ?A1; ?B1").unwrap();
        assert_eq!(out, vec!["1", "2"]);
    }

    #[test]
    fn test_run_script_dump() {
        let mut sheet = Sheet::default();
        let out = run_script(&mut sheet, "A1=1; B1==A1+1; ?").unwrap();
        assert_eq!(out, vec!["A1 = 1 => 1", "B1 = =A1+1 => 2"]);
    }

    #[test]
    fn test_blanking_through_a_script() {
        let mut sheet = Sheet::default();
        let out = run_script(&mut sheet, "A1=1; A2=2; B1==SUM(A1:A2); ?B1; A2=; ?B1").unwrap();
        assert_eq!(out, vec!["3", "1"]);
    }
}
