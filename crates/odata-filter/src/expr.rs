//! Leaf-clause rendering: comparisons, function calls, membership joins
//! and negation. Everything here produces finished grammar text; grouping
//! and precedence live in `odata_filter_core`.

use crate::{Field, Value};
use derive_more::Display;

///
/// CompareOp
///
/// Binary comparison operators, displayed as their grammar tokens.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub(crate) enum CompareOp {
    #[display("eq")]
    Eq,
    #[display("ge")]
    Ge,
    #[display("gt")]
    Gt,
    #[display("le")]
    Le,
    #[display("lt")]
    Lt,
    #[display("ne")]
    Ne,
}

pub(crate) fn compare(field: &Field, op: CompareOp, value: &Value) -> String {
    format!("{field} {op} {value}")
}

/// Render `name(field, args…)`, or `name(args…, field)` when `reversed`.
/// Zero arguments collapse to `name(field)`.
pub(crate) fn function_call(name: &str, field: &Field, args: &[Value], reversed: bool) -> String {
    if args.is_empty() {
        return format!("{name}({field})");
    }

    let args = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    if reversed {
        format!("{name}({args}, {field})")
    } else {
        format!("{name}({field}, {args})")
    }
}

/// Expand a membership test into an `or` join of equality comparisons.
/// Returns `None` for an empty value list.
pub(crate) fn membership(field: &Field, values: &[Value]) -> Option<String> {
    if values.is_empty() {
        return None;
    }

    let joined = values
        .iter()
        .map(|value| compare(field, CompareOp::Eq, value))
        .collect::<Vec<_>>()
        .join(" or ");

    Some(joined)
}

pub(crate) fn negate(inner: &str) -> String {
    format!("not ({inner})")
}

///
/// TESTS
///
