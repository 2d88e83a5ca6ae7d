use tracing::trace;

use crate::data::column::ColumnDescriptor;

/// Indices of the records that match a free-text query
///
/// A record passes when ANY searchable column's canonical string contains
/// the query, ignoring case. An empty or whitespace-only query passes every
/// record. Input order is preserved.
pub fn filter_indices<T>(records: &[T], query: &str, columns: &[ColumnDescriptor<T>]) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..records.len()).collect();
    }

    let targets: Vec<&ColumnDescriptor<T>> = columns
        .iter()
        .filter(|column| column.is_search_target())
        .collect();

    let matched: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_any(*record, &needle, &targets))
        .map(|(idx, _)| idx)
        .collect();

    trace!(
        "search '{}' over {} columns matched {}/{} records",
        needle,
        targets.len(),
        matched.len(),
        records.len()
    );
    matched
}

/// Check one record against an already lowercased needle
fn matches_any<T>(record: &T, needle: &str, targets: &[&ColumnDescriptor<T>]) -> bool {
    targets.iter().any(|column| {
        column
            .value(record)
            .map(|value| value.to_search_string().to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

/// Find columns whose label contains `pattern`, ignoring case
pub fn find_matching_columns<T>(columns: &[ColumnDescriptor<T>], pattern: &str) -> Vec<String> {
    let pattern_lower = pattern.to_lowercase();
    columns
        .iter()
        .filter(|column| column.label.to_lowercase().contains(&pattern_lower))
        .map(|column| column.key.clone())
        .collect()
}
