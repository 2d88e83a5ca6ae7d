use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace};

use crate::data::column::{find_column, ColumnDescriptor};
use crate::data::datavalue::DataValue;
use crate::data::datavalue_compare::SortKey;

/// Sort direction for the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header indicator for the active sort column
    pub fn indicator(self, use_glyphs: bool) -> &'static str {
        match (self, use_glyphs) {
            (SortDirection::Asc, true) => "▲",
            (SortDirection::Desc, true) => "▼",
            (SortDirection::Asc, false) => "^",
            (SortDirection::Desc, false) => "v",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Order `indices` by the column named `sort_key`
///
/// Returns the indices unchanged (natural order) when there is no sort key,
/// the key names no column, or the column is not sortable or has no
/// accessor. Nulls go last in both directions, and records with equal keys
/// keep their relative input order.
pub fn sort_indices<T>(
    records: &[T],
    indices: &[usize],
    columns: &[ColumnDescriptor<T>],
    sort_key: Option<&str>,
    direction: SortDirection,
) -> Vec<usize> {
    let Some(key) = sort_key else {
        return indices.to_vec();
    };

    let column = match find_column(columns, key) {
        Some(column) if column.is_sort_target() => column,
        Some(_) => {
            debug!("column '{}' is not sortable, keeping natural order", key);
            return indices.to_vec();
        }
        None => {
            debug!("unknown sort column '{}', keeping natural order", key);
            return indices.to_vec();
        }
    };

    // Extract and parse each key once; accessors may be arbitrarily expensive
    let mut keyed: Vec<(usize, Option<SortKey>)> = indices
        .iter()
        .filter_map(|&idx| {
            records.get(idx).map(|record| {
                let value = column.value(record).unwrap_or(DataValue::Null);
                (idx, SortKey::from_value(&value))
            })
        })
        .collect();

    trace!("sorting {} rows by '{}' {:?}", keyed.len(), key, direction);

    // slice::sort_by is stable
    keyed.sort_by(|(_, a), (_, b)| compare_sort_keys(a.as_ref(), b.as_ref(), direction));
    keyed.into_iter().map(|(idx, _)| idx).collect()
}

/// Compare two sort keys, nulls (`None`) last regardless of direction
pub fn compare_sort_keys(
    a: Option<&SortKey>,
    b: Option<&SortKey>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => direction.apply(a.cmp(b)),
    }
}
