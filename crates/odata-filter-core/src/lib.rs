//! Rule tree and serializer for OData `$filter` expressions.
//!
//! This crate owns the two load-bearing pieces of the filter builder:
//! - `RuleGroup` / `Rule`: an ordered boolean expression tree of opaque
//!   clauses joined by `and` / `or`, with a merge algorithm that regroups
//!   lazily so mixed-condition chains stay minimally nested.
//! - `serialize`: the deterministic rendering of a tree into filter text,
//!   parenthesizing only where grouping demands it.
//!
//! Clause text is produced by the expression layer in `odata-filter`; this
//! crate treats it as atomic.

mod condition;
mod rule;
mod serialize;


pub use condition::Condition;
pub use rule::{Rule, RuleGroup};
pub use serialize::serialize;
