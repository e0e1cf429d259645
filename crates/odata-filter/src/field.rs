use crate::Value;
use derive_more::Display;

///
/// Field
///
/// An owned field path, or a function expression composed over one, used on
/// the left-hand side of a comparison. Canonical-function methods wrap the
/// current expression, so chains read inside-out:
/// `field("Name").to_lower().length()` renders `length(tolower(Name))`.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{_0}")]
pub struct Field(String);

impl Field {
    /// Create a field reference from a property path like `SubType/Id`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the rendered expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    // ------------------------------------------------------------------
    // Canonical functions
    // ------------------------------------------------------------------

    /// `length(expr)`
    #[must_use]
    pub fn length(self) -> Self {
        Self(format!("length({self})"))
    }

    /// `tolower(expr)`
    #[must_use]
    pub fn to_lower(self) -> Self {
        Self(format!("tolower({self})"))
    }

    /// `toupper(expr)`
    #[must_use]
    pub fn to_upper(self) -> Self {
        Self(format!("toupper({self})"))
    }

    /// `trim(expr)`
    #[must_use]
    pub fn trim(self) -> Self {
        Self(format!("trim({self})"))
    }

    /// `substring(expr, start)`, or `substring(expr, start, length)` when a
    /// length is given.
    #[must_use]
    pub fn substring(self, start: u64, length: impl Into<Option<u64>>) -> Self {
        match length.into() {
            Some(length) => Self(format!("substring({self}, {start}, {length})")),
            None => Self(format!("substring({self}, {start})")),
        }
    }

    /// `concat(expr, value)`.
    ///
    /// Pass [`raw`](crate::raw) to concatenate another field instead of a
    /// literal.
    #[must_use]
    pub fn concat(self, value: impl Into<Value>) -> Self {
        Self(format!("concat({self}, {})", value.into()))
    }

    /// `indexof(expr, value)`
    #[must_use]
    pub fn index_of(self, value: impl Into<Value>) -> Self {
        Self(format!("indexof({self}, {})", value.into()))
    }
}

/// Shorthand for [`Field::new`].
#[must_use]
pub fn field(name: impl Into<String>) -> Field {
    Field::new(name)
}

// ----------------------------------------------------------------------
// Boundary traits
// ----------------------------------------------------------------------

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

///
/// TESTS
///
