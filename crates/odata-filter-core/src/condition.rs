use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Condition
///
/// The logical connective joining the rules of a group, rendered as the
/// grammar token `and` or `or`.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    #[display("and")]
    And,
    #[display("or")]
    Or,
}

impl Condition {
    /// The grammar token this condition renders as.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

///
/// TESTS
///
