use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Fixed human-readable format used when a date is coerced to text
pub const DATE_DISPLAY_FORMAT: &str = "%d %b %Y";

/// Fixed human-readable format used when a date-time is coerced to text
pub const DATETIME_DISPLAY_FORMAT: &str = "%d %b %Y %H:%M";

/// The comparable/searchable form of a record field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

impl DataValue {
    /// Canonical string coercion shared by search and text sorting
    ///
    /// Numbers are base-10, booleans `true`/`false`, dates use the fixed
    /// display formats and Null is the empty string.
    pub fn to_search_string(&self) -> String {
        self.to_string()
    }

    /// Convert a JSON field into a value
    ///
    /// Strings stay strings even when they look like dates; the comparator
    /// recognizes ISO-8601 strings on its own.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => DataValue::Null,
            JsonValue::Bool(b) => DataValue::Boolean(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    DataValue::Float(f)
                } else {
                    DataValue::String(n.to_string())
                }
            }
            JsonValue::String(s) => DataValue::String(s.clone()),
            other => DataValue::String(other.to_string()),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Date(d) => write!(f, "{}", d.format(DATE_DISPLAY_FORMAT)),
            DataValue::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_DISPLAY_FORMAT)),
            DataValue::Null => write!(f, ""),
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Integer(value.into())
    }
}

impl From<u32> for DataValue {
    fn from(value: u32) -> Self {
        DataValue::Integer(value.into())
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Boolean(value)
    }
}

impl From<NaiveDate> for DataValue {
    fn from(value: NaiveDate) -> Self {
        DataValue::Date(value)
    }
}

impl From<NaiveDateTime> for DataValue {
    fn from(value: NaiveDateTime) -> Self {
        DataValue::DateTime(value)
    }
}

impl<V: Into<DataValue>> From<Option<V>> for DataValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(DataValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_coercion() {
        assert_eq!(DataValue::Integer(-42).to_search_string(), "-42");
        assert_eq!(DataValue::Float(2.5).to_search_string(), "2.5");
        assert_eq!(DataValue::Float(3.0).to_search_string(), "3");
        assert_eq!(DataValue::Boolean(true).to_search_string(), "true");
        assert_eq!(DataValue::Null.to_search_string(), "");

        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(DataValue::Date(date).to_search_string(), "05 Jan 2024");
        let dt = date.and_hms_opt(14, 7, 0).unwrap();
        assert_eq!(DataValue::DateTime(dt).to_search_string(), "05 Jan 2024 14:07");
    }

    #[test]
    fn test_from_json() {
        assert_eq!(DataValue::from_json(&json!(null)), DataValue::Null);
        assert_eq!(DataValue::from_json(&json!(12)), DataValue::Integer(12));
        assert_eq!(DataValue::from_json(&json!(1.25)), DataValue::Float(1.25));
        assert_eq!(DataValue::from_json(&json!(false)), DataValue::Boolean(false));
        assert_eq!(
            DataValue::from_json(&json!("2024-02-01")),
            DataValue::String("2024-02-01".to_string())
        );
        assert_eq!(
            DataValue::from_json(&json!(["a", 1])),
            DataValue::String("[\"a\",1]".to_string())
        );
    }

    #[test]
    fn test_option_conversion() {
        let missing: Option<i64> = None;
        assert_eq!(DataValue::from(missing), DataValue::Null);
        assert_eq!(DataValue::from(Some("x")), DataValue::String("x".to_string()));
    }
}
