use crate::{FilterError, InputKind};
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

///
/// Value
///
/// A literal on the right-hand side of a comparison, rendered with OData v4
/// spelling: text is single-quoted with embedded quotes doubled, dates use
/// ISO-8601, guids render bare, and non-finite floats render as `NaN`,
/// `INF` and `-INF`.
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Float(f64),
    Guid(Uuid),
    Int(i64),
    Null,
    /// Verbatim passthrough; the text is emitted exactly as given.
    ///
    /// This is the escape hatch for literals the typed variants cannot
    /// express, such as `duration'PT1H'` or an enum member path.
    Raw(String),
    Text(String),
    Uint(u64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::DateTime(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Float(v) if v.is_infinite() => {
                f.write_str(if v.is_sign_positive() { "INF" } else { "-INF" })
            }
            Self::Float(v) => write!(f, "{v}"),
            Self::Guid(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => f.write_str("null"),
            Self::Raw(v) => f.write_str(v),
            Self::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

/// Shorthand for [`Value::Raw`].
#[must_use]
pub fn raw(text: impl Into<String>) -> Value {
    Value::Raw(text.into())
}

/// Implements `From<T> for Value` for simple conversions.
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool          => Bool,
    DateTime<Utc> => DateTime,
    f32           => Float,
    f64           => Float,
    i8            => Int,
    i16           => Int,
    i32           => Int,
    i64           => Int,
    NaiveDate     => Date,
    &str          => Text,
    String        => Text,
    u8            => Uint,
    u16           => Uint,
    u32           => Uint,
    u64           => Uint,
    Uuid          => Guid,
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::DateTime(v.with_timezone(&Utc))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = FilterError;

    /// Convert a dynamically sourced JSON scalar into a filter literal.
    /// Arrays and objects have no single-literal rendering and are rejected.
    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        let converted = match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(v) => Self::Bool(v),
            JsonValue::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Self::Int(v)
                } else if let Some(v) = n.as_u64() {
                    Self::Uint(v)
                } else {
                    // Numbers outside both integer ranges always view as f64.
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(v) => Self::Text(v),
            JsonValue::Array(_) => {
                return Err(FilterError::InvalidInputKind {
                    kind: InputKind::Array,
                });
            }
            JsonValue::Object(_) => {
                return Err(FilterError::InvalidInputKind {
                    kind: InputKind::Object,
                });
            }
        };

        Ok(converted)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn text_is_quoted_and_embedded_quotes_double() {
        assert_eq!(Value::from("Tom").to_string(), "'Tom'");
        assert_eq!(Value::from("O'Neil").to_string(), "'O''Neil'");
        assert_eq!(Value::from(String::new()).to_string(), "''");
    }

    #[test]
    fn numbers_render_bare() {
        assert_eq!(Value::from(42_i64).to_string(), "42");
        assert_eq!(Value::from(-7_i32).to_string(), "-7");
        assert_eq!(Value::from(9_u8).to_string(), "9");
        assert_eq!(Value::from(2.5_f64).to_string(), "2.5");
    }

    #[test]
    fn non_finite_floats_use_odata_spellings() {
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "INF");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-INF");
    }

    #[test]
    fn bools_and_null_render_bare() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn dates_use_iso_8601() {
        let date = NaiveDate::from_ymd_opt(2018, 5, 23).unwrap();
        assert_eq!(Value::from(date).to_string(), "2018-05-23");

        let stamp = Utc.with_ymd_and_hms(2024, 3, 9, 19, 45, 30).unwrap();
        assert_eq!(Value::from(stamp).to_string(), "2024-03-09T19:45:30.000Z");
    }

    #[test]
    fn offset_datetimes_normalize_to_utc() {
        let stamp = DateTime::parse_from_rfc3339("2024-03-09T21:45:30+02:00").unwrap();
        assert_eq!(Value::from(stamp).to_string(), "2024-03-09T19:45:30.000Z");
    }

    #[test]
    fn guids_render_bare() {
        let id = Uuid::parse_str("cd5977c2-4a64-42de-b2fc-7fe4707c65cd").unwrap();
        assert_eq!(
            Value::from(id).to_string(),
            "cd5977c2-4a64-42de-b2fc-7fe4707c65cd"
        );
    }

    #[test]
    fn raw_passes_through_verbatim() {
        assert_eq!(raw("duration'PT1H'").to_string(), "duration'PT1H'");
        assert_eq!(raw("Ns.Color'Red'").to_string(), "Ns.Color'Red'");
    }

    #[test]
    fn options_map_none_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(5_i64)), Value::Int(5));
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }

    #[test]
    fn json_scalars_convert() {
        assert_eq!(Value::try_from(json!(null)), Ok(Value::Null));
        assert_eq!(Value::try_from(json!(true)), Ok(Value::Bool(true)));
        assert_eq!(Value::try_from(json!(-3)), Ok(Value::Int(-3)));
        assert_eq!(Value::try_from(json!(u64::MAX)), Ok(Value::Uint(u64::MAX)));
        assert_eq!(Value::try_from(json!(2.5)), Ok(Value::Float(2.5)));
        assert_eq!(
            Value::try_from(json!("Tom")),
            Ok(Value::Text("Tom".to_string()))
        );
    }

    #[test]
    fn json_collections_are_rejected() {
        assert_eq!(
            Value::try_from(json!([1, 2])),
            Err(FilterError::InvalidInputKind {
                kind: InputKind::Array
            })
        );
        assert_eq!(
            Value::try_from(json!({"a": 1})),
            Err(FilterError::InvalidInputKind {
                kind: InputKind::Object
            })
        );
    }
}
