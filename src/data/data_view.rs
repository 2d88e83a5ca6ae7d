//! The table engine
//!
//! `RecordTable` pairs a column model with display options. It never stores
//! records or selection state: every call to [`RecordTable::evaluate`]
//! recomputes `paginate(sort(filter(data, query)))` from the caller's data
//! and `TableState`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::column::{find_column, ColumnDescriptor};
use crate::data::pagination::{paginate, PageInfo};
use crate::data::search_filter::filter_indices;
use crate::data::sort::{sort_indices, SortDirection};
use crate::state::events::TableAction;
use crate::state::table_state::{reduce, TableState, DEFAULT_PAGE_SIZE};

/// Table configuration supplied by the host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Enables the built-in search box; when false the query is ignored
    pub searchable: bool,
    /// Cosmetic only
    pub search_placeholder: String,
    pub page_size: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            searchable: true,
            search_placeholder: "Search...".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Header cell for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Set only on the active sort column
    pub sort_direction: Option<SortDirection>,
}

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub key: String,
    pub text: String,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Position of the record in the caller's collection
    pub source_index: usize,
    pub cells: Vec<CellView>,
}

impl RowView {
    pub fn cell(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.key == key)
            .map(|cell| cell.text.as_str())
    }

    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|cell| cell.text.as_str()).collect()
    }
}

/// Result of one evaluation
#[derive(Debug, Clone)]
pub struct TableView<'a, T> {
    pub headers: Vec<HeaderView>,
    /// Records on the current page, in display order
    pub page_items: Vec<&'a T>,
    pub rows: Vec<RowView>,
    pub page_info: PageInfo,
    pub search_enabled: bool,
    pub search_placeholder: String,
}

impl<T> TableView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.page_items.is_empty()
    }
}

/// Column model plus options; evaluates caller state against caller data
#[derive(Debug, Clone)]
pub struct RecordTable<T> {
    columns: Vec<ColumnDescriptor<T>>,
    options: TableOptions,
}

impl<T> RecordTable<T> {
    pub fn new(columns: Vec<ColumnDescriptor<T>>) -> Self {
        Self {
            columns,
            options: TableOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.options.page_size = page_size.max(1);
        self
    }

    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.options.searchable = searchable;
        self
    }

    pub fn columns(&self) -> &[ColumnDescriptor<T>] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn column(&self, key: &str) -> Option<&ColumnDescriptor<T>> {
        find_column(&self.columns, key)
    }

    /// State a freshly mounted table starts in
    pub fn initial_state(&self) -> TableState {
        TableState::new(self.options.page_size)
    }

    /// Source indices that pass the current search, in input order
    pub fn filtered_indices(&self, data: &[T], state: &TableState) -> Vec<usize> {
        let query = if self.options.searchable {
            state.search_query.as_str()
        } else {
            ""
        };
        filter_indices(data, query, &self.columns)
    }

    /// Source indices after search and sort, before pagination
    pub fn ordered_indices(&self, data: &[T], state: &TableState) -> Vec<usize> {
        let filtered = self.filtered_indices(data, state);
        sort_indices(
            data,
            &filtered,
            &self.columns,
            state.sort_key.as_deref(),
            state.sort_direction,
        )
    }

    /// Page count for the current search
    pub fn total_pages(&self, data: &[T], state: &TableState) -> usize {
        PageInfo::pages_for(self.filtered_indices(data, state).len(), state.page_size)
    }

    /// Run the full pipeline for one render
    pub fn evaluate<'a>(&self, data: &'a [T], state: &TableState) -> TableView<'a, T> {
        let ordered = self.ordered_indices(data, state);
        let (page_info, range) = paginate(ordered.len(), state.page, state.page_size);

        let page_indices = &ordered[range];
        let page_items: Vec<&'a T> = page_indices.iter().map(|&idx| &data[idx]).collect();
        let rows = page_indices
            .iter()
            .map(|&idx| self.render_row(idx, &data[idx]))
            .collect();

        debug!(
            "evaluated {} records: {} after search, page {}/{} shows {}",
            data.len(),
            ordered.len(),
            page_info.page,
            page_info.total_pages,
            page_indices.len()
        );

        TableView {
            headers: self.headers(state),
            page_items,
            rows,
            page_info,
            search_enabled: self.options.searchable,
            search_placeholder: self.options.search_placeholder.clone(),
        }
    }

    /// Apply a user action, bounding page navigation by the current data
    ///
    /// Toggling a column that is unknown or not sortable leaves the state
    /// unchanged.
    pub fn transition(&self, data: &[T], state: &TableState, action: &TableAction) -> TableState {
        if let TableAction::ToggleSort(key) = action {
            let clickable = self
                .column(key)
                .map(|column| column.is_sort_target())
                .unwrap_or(false);
            if !clickable {
                debug!("ignoring sort toggle on non-sortable column '{}'", key);
                return state.clone();
            }
        }

        let total_pages = self.total_pages(data, state);
        reduce(state, action, total_pages)
    }

    fn headers(&self, state: &TableState) -> Vec<HeaderView> {
        // An active key that is not a sort target is not shown as sorted
        self.columns
            .iter()
            .map(|column| HeaderView {
                key: column.key.clone(),
                label: column.label.clone(),
                sortable: column.is_sort_target(),
                sort_direction: if column.is_sort_target() {
                    state.sort_direction_for(&column.key)
                } else {
                    None
                },
            })
            .collect()
    }

    fn render_row(&self, source_index: usize, record: &T) -> RowView {
        RowView {
            source_index,
            cells: self
                .columns
                .iter()
                .map(|column| CellView {
                    key: column.key.clone(),
                    text: column.render_cell(record),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datavalue::DataValue;

    #[derive(Debug, PartialEq)]
    struct Request {
        id: u32,
        kind: &'static str,
        status: &'static str,
    }

    fn requests() -> Vec<Request> {
        vec![
            Request { id: 1, kind: "Laptop", status: "Pending" },
            Request { id: 2, kind: "Monitor", status: "Approved" },
            Request { id: 3, kind: "Chair", status: "Pending" },
            Request { id: 4, kind: "Desk", status: "Rejected" },
            Request { id: 5, kind: "Headset", status: "Pending" },
        ]
    }

    fn table() -> RecordTable<Request> {
        RecordTable::new(vec![
            ColumnDescriptor::new("id", "ID").with_accessor(|r: &Request| r.id.into()),
            ColumnDescriptor::new("kind", "Item").with_accessor(|r: &Request| r.kind.into()),
            ColumnDescriptor::new("status", "Status")
                .with_accessor(|r: &Request| r.status.into())
                .with_render(|r: &Request| format!("<{}>", r.status.to_uppercase())),
            ColumnDescriptor::new("actions", "").with_render(|r: &Request| format!("edit #{}", r.id)),
        ])
        .with_page_size(2)
    }

    fn ids(view: &TableView<'_, Request>) -> Vec<u32> {
        view.page_items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_initial_evaluation() {
        let data = requests();
        let table = table();
        let state = table.initial_state();
        let view = table.evaluate(&data, &state);

        assert_eq!(ids(&view), vec![1, 2]);
        assert_eq!(view.page_info.total_pages, 3);
        assert_eq!(view.rows[0].texts(), vec!["1", "Laptop", "<PENDING>", "edit #1"]);
        assert!(view.search_enabled);
        assert!(view.headers.iter().all(|h| h.sort_direction.is_none()));
        assert!(!view.headers[3].sortable);
    }

    #[test]
    fn test_sort_by_status_is_stable() {
        let data = requests();
        let table = table().with_page_size(10);
        let state = table.transition(
            &data,
            &table.initial_state(),
            &TableAction::ToggleSort("status".to_string()),
        );
        let view = table.evaluate(&data, &state);

        // Three "Pending" rows keep their original relative order
        assert_eq!(ids(&view), vec![2, 1, 3, 5, 4]);
        assert_eq!(view.headers[2].sort_direction, Some(SortDirection::Asc));
    }

    #[test]
    fn test_render_text_is_not_searched() {
        let data = requests();
        let table = table();
        let state = table.transition(
            &data,
            &table.initial_state(),
            &TableAction::SetSearch("edit".to_string()),
        );
        let view = table.evaluate(&data, &state);
        assert!(view.is_empty());
        assert_eq!(view.page_info.total_pages, 1);
    }

    #[test]
    fn test_toggle_on_render_only_column_is_ignored() {
        let data = requests();
        let table = table();
        let state = table.initial_state();
        let next = table.transition(&data, &state, &TableAction::ToggleSort("actions".to_string()));
        assert_eq!(next, state);
        let next = table.transition(&data, &state, &TableAction::ToggleSort("nope".to_string()));
        assert_eq!(next, state);
    }

    #[test]
    fn test_search_disabled_ignores_query() {
        let data = requests();
        let table = table().with_searchable(false);
        let state = TableState {
            search_query: "desk".to_string(),
            ..table.initial_state()
        };
        let view = table.evaluate(&data, &state);
        assert_eq!(view.page_info.total_items, 5);
        assert!(!view.search_enabled);
    }

    #[test]
    fn test_go_to_page_uses_filtered_count() {
        let data = requests();
        let table = table();
        let state = table.transition(
            &data,
            &table.initial_state(),
            &TableAction::SetSearch("pending".to_string()),
        );
        let state = table.transition(&data, &state, &TableAction::GoToPage(7));
        assert_eq!(state.page, 2);

        let view = table.evaluate(&data, &state);
        assert_eq!(ids(&view), vec![5]);
        assert_eq!(view.rows[0].source_index, 4);
    }

    #[test]
    fn test_malformed_sortable_column_keeps_natural_order() {
        let data = requests();
        let table = RecordTable::new(vec![
            ColumnDescriptor::new("badge", "Badge")
                .with_render(|r: &Request| r.status.to_string())
                .with_sortable(true),
            ColumnDescriptor::new("id", "ID").with_accessor(|r: &Request| DataValue::from(r.id)),
        ]);
        let state = TableState {
            sort_key: Some("badge".to_string()),
            sort_direction: SortDirection::Desc,
            ..table.initial_state()
        };
        let view = table.evaluate(&data, &state);
        assert_eq!(ids(&view), vec![1, 2, 3, 4, 5]);
        assert_eq!(view.headers[0].sort_direction, None);
    }
}
