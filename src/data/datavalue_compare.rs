use crate::data::datavalue::DataValue;
use crate::data::type_inference::TypeInference;
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// A non-null value prepared for comparison
///
/// Keys compare by class first (numbers, then points in time, then text)
/// and within a class by value. Two numbers always compare numerically and
/// two dates always chronologically, whatever else the column holds.
#[derive(Debug, Clone)]
pub enum SortKey {
    Integer(i64),
    /// `-0.0` is stored as `0.0`
    Float(f64),
    Chronological(NaiveDateTime),
    /// Lowercased canonical string
    Text(String),
}

impl SortKey {
    /// Build the key for a value, `None` for Null
    ///
    /// ISO-8601 strings are parsed here, once per value.
    pub fn from_value(value: &DataValue) -> Option<SortKey> {
        let key = match value {
            DataValue::Null => return None,
            DataValue::Integer(i) => SortKey::Integer(*i),
            DataValue::Float(f) => SortKey::Float(if *f == 0.0 { 0.0 } else { *f }),
            DataValue::Date(d) => SortKey::Chronological(d.and_time(chrono::NaiveTime::MIN)),
            DataValue::DateTime(dt) => SortKey::Chronological(*dt),
            DataValue::String(s) => match TypeInference::parse_iso_datetime(s) {
                Some(iso) => SortKey::Chronological(iso.to_datetime()),
                None => SortKey::Text(s.to_lowercase()),
            },
            DataValue::Boolean(_) => SortKey::Text(value.to_search_string()),
        };
        Some(key)
    }

    fn class(&self) -> u8 {
        match self {
            SortKey::Integer(_) | SortKey::Float(_) => 0,
            SortKey::Chronological(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Integer(i), SortKey::Float(f)) => compare_int_float(*i, *f),
            (SortKey::Float(f), SortKey::Integer(i)) => compare_int_float(*i, *f).reverse(),
            (SortKey::Float(a), SortKey::Float(b)) => compare_floats(*a, *b),
            (SortKey::Chronological(a), SortKey::Chronological(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.class().cmp(&other.class()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// NaN sorts above every number
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float
///
/// Converting the integer to f64 would round above 2^53 and make the order
/// intransitive.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() || f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        other => other,
    }
}
