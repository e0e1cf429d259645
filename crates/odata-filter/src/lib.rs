//! ## Crate layout
//! - `builder`: the fluent [`Filter`] surface and its rule inputs.
//! - `error`: the literal-conversion error types.
//! - `expr`: leaf-clause rendering (comparisons, functions, negation).
//! - `field`: field paths and canonical-function composition.
//! - `value`: literal normalization into grammar spellings.
//!
//! Tree grouping, merging, and serialization live in `odata_filter_core`
//! and are re-exported here; the `prelude` module mirrors the surface most
//! call sites need.

mod builder;
mod error;
mod expr;
mod field;
mod value;


pub use builder::{Filter, RuleArg, group};
pub use error::{FilterError, InputKind};
pub use field::{Field, field};
pub use value::{Value, raw};

pub use odata_filter_core::{Condition, Rule, RuleGroup, serialize};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Condition, Field, Filter, Value, field, group, raw};
}
