//! Shared type inference logic
//!
//! Centralizes value type detection so the loaders and the sort comparator
//! agree on what counts as a number, a boolean or an ISO-8601 date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::data::datavalue::DataValue;

/// Static compiled regex patterns for ISO-8601 date detection
static ISO_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // YYYY-MM-DD
        Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap(),
        // YYYY-MM-DDTHH:MM[:SS[.fff]] (space separator accepted)
        Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])[T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?$")
            .unwrap(),
        // With timezone: Z or +/-HH:MM
        Regex::new(
            r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$",
        )
        .unwrap(),
    ]
});

/// Detected data type for a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    Boolean,
    Integer,
    Float,
    Date,
    DateTime,
    String,
    Null,
}

/// Type inference utilities
pub struct TypeInference;

impl TypeInference {
    /// Infer the type of a single string value
    ///
    /// Order of checks matters: cheap string comparisons first, date
    /// detection last.
    pub fn infer_from_string(value: &str) -> InferredType {
        if value.is_empty() {
            return InferredType::Null;
        }

        if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            return InferredType::Boolean;
        }

        if value.parse::<i64>().is_ok() {
            return InferredType::Integer;
        }

        // "inf" and "NaN" parse as f64 but are words in tabular data
        if value.bytes().any(|b| b.is_ascii_digit()) && value.parse::<f64>().is_ok() {
            return InferredType::Float;
        }

        match Self::parse_iso_datetime(value) {
            Some(IsoValue::Date(_)) => InferredType::Date,
            Some(IsoValue::DateTime(_)) => InferredType::DateTime,
            None => InferredType::String,
        }
    }

    /// Check if a string looks like an ISO-8601 date or date-time
    ///
    /// Uses strict patterns so ids like "ORDER-2024-001" are not mistaken
    /// for dates.
    pub fn looks_like_iso_date(value: &str) -> bool {
        if value.len() < 10 || value.len() > 35 {
            return false;
        }

        ISO_DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value))
    }

    /// Parse an ISO-8601 date or date-time string
    ///
    /// Offsets are normalized to UTC before dropping the timezone.
    pub fn parse_iso_datetime(value: &str) -> Option<IsoValue> {
        if !Self::looks_like_iso_date(value) {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(IsoValue::Date(date));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(IsoValue::DateTime(dt.naive_utc()));
        }

        const FORMATS: [&str; 4] = [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ];
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(IsoValue::DateTime)
    }

    /// Merge two types when a column has mixed values
    ///
    /// Null yields to anything, Integer + Float widens to Float, Date +
    /// DateTime widens to DateTime, everything else becomes String.
    pub fn merge_types(type1: InferredType, type2: InferredType) -> InferredType {
        use InferredType::*;

        match (type1, type2) {
            (t1, t2) if t1 == t2 => t1,
            (Null, t) | (t, Null) => t,
            (Integer, Float) | (Float, Integer) => Float,
            (Date, DateTime) | (DateTime, Date) => DateTime,
            _ => String,
        }
    }

    /// Infer a column type from sample values
    pub fn infer_from_samples<'a, I>(values: I) -> InferredType
    where
        I: Iterator<Item = &'a str>,
    {
        values
            .map(Self::infer_from_string)
            .fold(InferredType::Null, Self::merge_types)
    }

    /// Convert a raw text cell into a typed value
    pub fn infer_value(value: &str) -> DataValue {
        match Self::infer_from_string(value) {
            InferredType::Null => DataValue::Null,
            InferredType::Boolean => DataValue::Boolean(value.eq_ignore_ascii_case("true")),
            InferredType::Integer => value
                .parse::<i64>()
                .map(DataValue::Integer)
                .unwrap_or_else(|_| DataValue::String(value.to_string())),
            InferredType::Float => value
                .parse::<f64>()
                .map(DataValue::Float)
                .unwrap_or_else(|_| DataValue::String(value.to_string())),
            InferredType::Date | InferredType::DateTime => match Self::parse_iso_datetime(value) {
                Some(iso) => iso.into(),
                None => DataValue::String(value.to_string()),
            },
            InferredType::String => DataValue::String(value.to_string()),
        }
    }
}

/// Result of parsing an ISO-8601 string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl IsoValue {
    /// Both variants as a point in time; plain dates sit at midnight
    pub fn to_datetime(self) -> NaiveDateTime {
        match self {
            IsoValue::Date(date) => date.and_time(chrono::NaiveTime::MIN),
            IsoValue::DateTime(dt) => dt,
        }
    }
}

impl From<IsoValue> for DataValue {
    fn from(value: IsoValue) -> Self {
        match value {
            IsoValue::Date(date) => DataValue::Date(date),
            IsoValue::DateTime(dt) => DataValue::DateTime(dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_inference() {
        assert_eq!(TypeInference::infer_from_string(""), InferredType::Null);
        assert_eq!(
            TypeInference::infer_from_string("TRUE"),
            InferredType::Boolean
        );
        assert_eq!(TypeInference::infer_from_string("42"), InferredType::Integer);
        assert_eq!(TypeInference::infer_from_string("-1.5"), InferredType::Float);
        assert_eq!(
            TypeInference::infer_from_string("Pending"),
            InferredType::String
        );
    }

    #[test]
    fn test_date_detection() {
        assert_eq!(
            TypeInference::infer_from_string("2024-03-15"),
            InferredType::Date
        );
        assert_eq!(
            TypeInference::infer_from_string("2024-03-15T09:30:00"),
            InferredType::DateTime
        );
        assert_eq!(
            TypeInference::infer_from_string("2024-03-15T09:30:00Z"),
            InferredType::DateTime
        );
        assert_eq!(
            TypeInference::infer_from_string("2024-03-15 09:30"),
            InferredType::DateTime
        );
    }

    #[test]
    fn test_id_strings_are_not_dates() {
        assert!(!TypeInference::looks_like_iso_date("ORDER-2024-001"));
        assert!(!TypeInference::looks_like_iso_date("BQ-123456"));
        assert!(!TypeInference::looks_like_iso_date("2024-13-01"));
        // Matches the pattern but is not a real calendar day
        assert_eq!(TypeInference::parse_iso_datetime("2024-02-31"), None);
    }

    #[test]
    fn test_timezone_is_normalized() {
        let a = TypeInference::parse_iso_datetime("2024-03-15T10:00:00+02:00").unwrap();
        let b = TypeInference::parse_iso_datetime("2024-03-15T08:00:00Z").unwrap();
        assert_eq!(a.to_datetime(), b.to_datetime());
    }

    #[test]
    fn test_column_inference() {
        let ints = ["1", "", "42"];
        assert_eq!(
            TypeInference::infer_from_samples(ints.iter().copied()),
            InferredType::Integer
        );
        let numbers = ["1", "2.5"];
        assert_eq!(
            TypeInference::infer_from_samples(numbers.iter().copied()),
            InferredType::Float
        );
        let codes = ["00123", "A-77"];
        assert_eq!(
            TypeInference::infer_from_samples(codes.iter().copied()),
            InferredType::String
        );
        let dates = ["2024-01-01", "2024-01-02T10:00:00"];
        assert_eq!(
            TypeInference::infer_from_samples(dates.iter().copied()),
            InferredType::DateTime
        );
    }

    #[test]
    fn test_infer_value() {
        assert_eq!(TypeInference::infer_value(""), DataValue::Null);
        assert_eq!(TypeInference::infer_value("7"), DataValue::Integer(7));
        assert_eq!(TypeInference::infer_value("false"), DataValue::Boolean(false));
        assert_eq!(
            TypeInference::infer_value("2024-01-05"),
            DataValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert_eq!(
            TypeInference::infer_value("Sick leave"),
            DataValue::String("Sick leave".to_string())
        );
    }
}
