//! Expression evaluation.
//!
//! [`evaluate`] is a pure function of a parsed expression and the
//! committed values of its precedents, supplied through a lookup
//! callback. It never re-enters parsing or graph maintenance, and it
//! never fails: every error mode is an ordinary [`Value::Error`].
//!
//! Propagation policy: any operator or function that consumes an erroring
//! operand yields that same error, first-encountered and left-to-right,
//! except operations that detect their own condition (a division whose
//! divisor is 0 reports `#DIV/0!` even when both operands are clean).

use super::ast::{BinOp, Expr, Formula};
use super::cell_ref::CellId;
use super::value::{ErrorKind, Value};
use crate::builtins;

/// Value lookup for cell references. The store binds this to committed
/// values; blanks read as `Empty`, out-of-bounds ids as `#REF!`.
pub type Lookup<'a> = dyn Fn(CellId) -> Value + 'a;

/// Evaluate a parsed formula against current precedent values.
pub fn evaluate_formula(formula: &Formula, lookup: &Lookup) -> Value {
    match formula {
        Formula::Empty => Value::Empty,
        Formula::Number(n) => Value::Number(*n),
        Formula::Text(s) => Value::Text(s.clone()),
        Formula::Expr(expr) => evaluate(expr, lookup),
    }
}

/// Evaluate an expression tree. One exhaustive match over the AST.
pub fn evaluate(expr: &Expr, lookup: &Lookup) -> Value {
    match expr {
        Expr::Number(n) => Value::Number(*n),
        Expr::Ref(id) => lookup(*id),
        // A range is only meaningful as an aggregate argument; in scalar
        // position it is a type error.
        Expr::Range(..) => Value::Error(ErrorKind::TypeMismatch),
        Expr::Neg(inner) => match evaluate(inner, lookup).as_number() {
            Ok(n) => Value::Number(-n),
            Err(kind) => Value::Error(kind),
        },
        Expr::Binary { op, lhs, rhs } => binary(*op, lhs, rhs, lookup),
        Expr::Call { name, args } => builtins::call(name, args, lookup),
        Expr::Invalid(kind) => Value::Error(*kind),
    }
}

fn binary(op: BinOp, lhs: &Expr, rhs: &Expr, lookup: &Lookup) -> Value {
    let a = match evaluate(lhs, lookup).as_number() {
        Ok(n) => n,
        Err(kind) => return Value::Error(kind),
    };
    let b = match evaluate(rhs, lookup).as_number() {
        Ok(n) => n,
        Err(kind) => return Value::Error(kind),
    };

    let n = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return Value::Error(ErrorKind::DivideByZero);
            }
            a / b
        }
    };
    Value::Number(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parser::parse_expr;
    use std::collections::HashMap;

    fn id(name: &str) -> CellId {
        CellId::parse_a1(name).unwrap()
    }

    fn eval_with(src: &str, cells: &[(&str, Value)]) -> Value {
        let values: HashMap<CellId, Value> = cells
            .iter()
            .map(|(name, value)| (id(name), value.clone()))
            .collect();
        let lookup = |rid: CellId| values.get(&rid).cloned().unwrap_or_default();
        evaluate(&parse_expr(src), &lookup)
    }

    fn eval(src: &str) -> Value {
        eval_with(src, &[])
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1+2*3"), Value::Number(7.0));
        assert_eq!(eval("(1+2)*3"), Value::Number(9.0));
        assert_eq!(eval("10-3-2"), Value::Number(5.0));
        assert_eq!(eval("-2*3"), Value::Number(-6.0));
        assert_eq!(eval("10/4"), Value::Number(2.5));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(eval("10/0"), Value::Error(ErrorKind::DivideByZero));
        assert_eq!(
            eval_with("A1/B1", &[("A1", Value::Number(1.0))]),
            Value::Error(ErrorKind::DivideByZero)
        );
    }

    #[test]
    fn test_references_read_through_lookup() {
        assert_eq!(
            eval_with("A1+1", &[("A1", Value::Number(4.0))]),
            Value::Number(5.0)
        );
        // Blank cells coerce to 0.
        assert_eq!(eval("A1+1"), Value::Number(1.0));
    }

    #[test]
    fn test_numeric_text_coerces() {
        assert_eq!(
            eval_with("A1*2", &[("A1", Value::Text("21".into()))]),
            Value::Number(42.0)
        );
        assert_eq!(
            eval_with("A1*2", &[("A1", Value::Text("twenty".into()))]),
            Value::Error(ErrorKind::TypeMismatch)
        );
    }

    #[test]
    fn test_errors_propagate_first_left_to_right() {
        let cells = [
            ("A1", Value::Error(ErrorKind::DivideByZero)),
            ("B1", Value::Error(ErrorKind::TypeMismatch)),
        ];
        assert_eq!(
            eval_with("A1+B1", &cells),
            Value::Error(ErrorKind::DivideByZero)
        );
        assert_eq!(
            eval_with("B1+A1", &cells),
            Value::Error(ErrorKind::TypeMismatch)
        );
    }

    #[test]
    fn test_range_in_scalar_position_is_type_mismatch() {
        assert_eq!(eval("A1:B2+1"), Value::Error(ErrorKind::TypeMismatch));
    }

    #[test]
    fn test_invalid_nodes_surface_their_kind() {
        assert_eq!(eval("1+"), Value::Error(ErrorKind::ParseError));
        assert_eq!(eval("FOO+1"), Value::Error(ErrorKind::InvalidReference));
    }

    #[test]
    fn test_formula_literals_evaluate_to_themselves() {
        let lookup = |_: CellId| Value::Empty;
        assert_eq!(
            evaluate_formula(&Formula::Number(3.5), &lookup),
            Value::Number(3.5)
        );
        assert_eq!(
            evaluate_formula(&Formula::Text("hi".into()), &lookup),
            Value::Text("hi".into())
        );
        assert_eq!(evaluate_formula(&Formula::Empty, &lookup), Value::Empty);
    }
}
