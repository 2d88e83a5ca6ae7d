//! Column model
//!
//! A column describes how one field of a record is labelled, sorted,
//! searched and rendered. Sorting and searching go through the `accessor`;
//! `render` is presentation only and is never compared or searched.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::data::datavalue::DataValue;

/// Extracts the comparable/searchable value of a field
pub type Accessor<T> = Arc<dyn Fn(&T) -> DataValue + Send + Sync>;

/// Produces the display text of a cell
pub type Renderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Direct field lookup by column key
///
/// Columns built with [`ColumnDescriptor::field`] use this as their accessor.
pub trait Record {
    /// Value of the field named `key`, `DataValue::Null` when absent
    fn field(&self, key: &str) -> DataValue;
}

/// Record type produced by the CSV loader
pub type DataRecord = HashMap<String, DataValue>;

impl Record for DataRecord {
    fn field(&self, key: &str) -> DataValue {
        self.get(key).cloned().unwrap_or(DataValue::Null)
    }
}

impl Record for JsonValue {
    fn field(&self, key: &str) -> DataValue {
        self.get(key)
            .map(DataValue::from_json)
            .unwrap_or(DataValue::Null)
    }
}

/// Describes one displayed field of `T`
pub struct ColumnDescriptor<T> {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub searchable: bool,
    accessor: Option<Accessor<T>>,
    render: Option<Renderer<T>>,
}

impl<T> ColumnDescriptor<T> {
    /// A presentation-only column with no accessor
    ///
    /// Without an accessor the column is neither searched nor sorted; attach
    /// one with [`with_accessor`](Self::with_accessor).
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            searchable: true,
            accessor: None,
            render: None,
        }
    }

    /// A sortable column reading its value through `accessor`
    pub fn with_accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&T) -> DataValue + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self.sortable = true;
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    /// Comparable value of this column for `record`, if the column has an accessor
    pub fn value(&self, record: &T) -> Option<DataValue> {
        self.accessor.as_ref().map(|accessor| accessor(record))
    }

    /// True when the column can be the active sort column
    pub fn is_sort_target(&self) -> bool {
        self.sortable && self.accessor.is_some()
    }

    /// True when search looks at this column
    pub fn is_search_target(&self) -> bool {
        self.searchable && self.accessor.is_some()
    }

    /// Display text for a cell
    ///
    /// Uses `render` when present, otherwise the raw value's canonical
    /// string, otherwise an empty cell.
    pub fn render_cell(&self, record: &T) -> String {
        if let Some(render) = &self.render {
            return render(record);
        }
        self.value(record)
            .map(|value| value.to_string())
            .unwrap_or_default()
    }
}

impl<T: Record + 'static> ColumnDescriptor<T> {
    /// A sortable, searchable column reading the field named `key`
    pub fn field(key: impl Into<String>, label: impl Into<String>) -> Self {
        let key = key.into();
        let lookup = key.clone();
        Self::new(key, label).with_accessor(move |record: &T| record.field(&lookup))
    }
}

impl<T> Clone for ColumnDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            accessor: self.accessor.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("has_accessor", &self.accessor.is_some())
            .field("has_render", &self.render.is_some())
            .finish()
    }
}

/// Find a column by key
pub fn find_column<'c, T>(
    columns: &'c [ColumnDescriptor<T>],
    key: &str,
) -> Option<&'c ColumnDescriptor<T>> {
    columns.iter().find(|column| column.key == key)
}
