use derive_more::Display;
use thiserror::Error as ThisError;

///
/// FilterError
///
/// The one fallible surface of the crate. Building a filter never fails —
/// empty rules are documented no-ops — so errors only arise where
/// dynamically typed data is converted into filter literals.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    #[error("a json {kind} has no single-literal rendering")]
    InvalidInputKind { kind: InputKind },
}

///
/// InputKind
///
/// The shapes of dynamic input that cannot become a filter literal.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum InputKind {
    #[display("array")]
    Array,
    #[display("object")]
    Object,
}

///
/// TESTS
///
