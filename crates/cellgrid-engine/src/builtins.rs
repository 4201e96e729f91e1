//! Built-in spreadsheet functions and their metadata.
//!
//! Conventions:
//! - Spreadsheet-facing names are ALL CAPS (e.g. `SUM`, `AVG`); lookup is
//!   case-insensitive because the parser uppercases call names.
//! - Aggregates accept any mix of range and scalar arguments; every
//!   argument's values are folded in order, ranges flattened row-major.
//! - Folds short-circuit on the first error value encountered.
//! - If you add a new aggregate, update `AGGREGATES` and its fold arm in
//!   `fold_values`.

use crate::engine::{ErrorKind, Expr, Lookup, Value, evaluate, expand_range};

/// How an aggregate combines its argument values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fold {
    Sum,
    Product,
    Min,
    Max,
    Avg,
    Count,
}

pub struct Aggregate {
    pub name: &'static str,
    pub fold: Fold,
    #[allow(dead_code)]
    pub description: &'static str,
}

pub const AGGREGATES: &[Aggregate] = &[
    Aggregate {
        name: "SUM",
        fold: Fold::Sum,
        description: "Sum of the numeric values in the arguments",
    },
    Aggregate {
        name: "PRODUCT",
        fold: Fold::Product,
        description: "Product of the numeric values in the arguments",
    },
    Aggregate {
        name: "MIN",
        fold: Fold::Min,
        description: "Minimum numeric value in the arguments",
    },
    Aggregate {
        name: "MAX",
        fold: Fold::Max,
        description: "Maximum numeric value in the arguments",
    },
    Aggregate {
        name: "AVG",
        fold: Fold::Avg,
        description: "Average of the numeric values in the arguments",
    },
    Aggregate {
        name: "COUNT",
        fold: Fold::Count,
        description: "Count of non-blank cells in the arguments",
    },
];

pub fn lookup_aggregate(name: &str) -> Option<&'static Aggregate> {
    AGGREGATES.iter().find(|a| a.name == name)
}

/// Dispatch a function call. Unknown names evaluate to `#PARSE!`.
pub fn call(name: &str, args: &[Expr], lookup: &Lookup) -> Value {
    if name == "IF" {
        return eval_if(args, lookup);
    }
    match lookup_aggregate(name) {
        Some(aggregate) => fold_args(aggregate.fold, args, lookup),
        None => Value::Error(ErrorKind::ParseError),
    }
}

/// `IF(cond, then, else)`: the condition coerces to a number, nonzero is
/// true, and only the selected branch is evaluated.
fn eval_if(args: &[Expr], lookup: &Lookup) -> Value {
    if args.len() != 3 {
        return Value::Error(ErrorKind::ParseError);
    }
    let cond = match evaluate(&args[0], lookup).as_number() {
        Ok(n) => n,
        Err(kind) => return Value::Error(kind),
    };
    if cond != 0.0 {
        evaluate(&args[1], lookup)
    } else {
        evaluate(&args[2], lookup)
    }
}

fn fold_args(fold: Fold, args: &[Expr], lookup: &Lookup) -> Value {
    let mut values = Vec::new();

    for arg in args {
        match arg {
            Expr::Range(a, b) => {
                let Some(cells) = expand_range(*a, *b) else {
                    return Value::Error(ErrorKind::InvalidReference);
                };
                for id in cells {
                    let value = lookup(id);
                    if let Value::Error(kind) = value {
                        return Value::Error(kind);
                    }
                    values.push(value);
                }
            }
            _ => {
                let value = evaluate(arg, lookup);
                if let Value::Error(kind) = value {
                    return Value::Error(kind);
                }
                values.push(value);
            }
        }
    }

    fold_values(fold, &values)
}

fn fold_values(fold: Fold, values: &[Value]) -> Value {
    let count = values.iter().filter(|v| !v.is_empty()).count();
    if fold == Fold::Count {
        return Value::Number(count as f64);
    }

    // Numeric folds: blanks contribute 0 (and count toward AVG's
    // denominator); non-numeric text is a type mismatch.
    let mut nums = Vec::with_capacity(values.len());
    for value in values {
        match value.as_number() {
            Ok(n) => nums.push(n),
            Err(kind) => return Value::Error(kind),
        }
    }

    match fold {
        Fold::Sum => Value::Number(nums.iter().sum()),
        Fold::Product => Value::Number(nums.iter().product()),
        Fold::Min if nums.is_empty() => Value::Error(ErrorKind::ParseError),
        Fold::Min => Value::Number(nums.iter().copied().fold(f64::INFINITY, f64::min)),
        Fold::Max if nums.is_empty() => Value::Error(ErrorKind::ParseError),
        Fold::Max => Value::Number(nums.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        Fold::Avg if nums.is_empty() => Value::Error(ErrorKind::DivideByZero),
        Fold::Avg => Value::Number(nums.iter().sum::<f64>() / nums.len() as f64),
        Fold::Count => Value::Number(count as f64),
    }
}
