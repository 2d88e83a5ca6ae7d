use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::sort::SortDirection;
use crate::state::events::TableAction;

/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Caller-owned selection fed into every evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub search_query: String,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    /// 1-indexed
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    /// Initial state: no search, natural order, first page
    pub fn new(page_size: usize) -> Self {
        Self {
            search_query: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Direction for `key` if it is the active sort column
    pub fn sort_direction_for(&self, key: &str) -> Option<SortDirection> {
        match &self.sort_key {
            Some(active) if active == key => Some(self.sort_direction),
            _ => None,
        }
    }
}

/// Apply one action to a state
///
/// `total_pages` is the page count of the current filtered collection and
/// bounds page navigation. Search and page-size changes go back to page 1;
/// sorting never resets the page.
pub fn reduce(state: &TableState, action: &TableAction, total_pages: usize) -> TableState {
    let total_pages = total_pages.max(1);
    let mut next = state.clone();

    match action {
        TableAction::SetSearch(query) => {
            next.search_query = query.clone();
            next.page = 1;
        }
        TableAction::ClearSearch => {
            next.search_query.clear();
            next.page = 1;
        }
        TableAction::ToggleSort(key) => {
            if state.sort_key.as_deref() == Some(key.as_str()) {
                next.sort_direction = state.sort_direction.toggle();
            } else {
                next.sort_key = Some(key.clone());
                next.sort_direction = SortDirection::Asc;
            }
        }
        TableAction::ClearSort => {
            next.sort_key = None;
            next.sort_direction = SortDirection::Asc;
        }
        TableAction::GoToPage(page) => {
            next.page = (*page).clamp(1, total_pages);
        }
        TableAction::NextPage => {
            next.page = state.page.saturating_add(1).clamp(1, total_pages);
        }
        TableAction::PreviousPage => {
            next.page = state.page.saturating_sub(1).clamp(1, total_pages);
        }
        TableAction::SetPageSize(size) => {
            next.page_size = (*size).max(1);
            next.page = 1;
        }
    }

    debug!(
        "{:?}: page {} -> {}, sort {:?} {:?}",
        action, state.page, next.page, next.sort_key, next.sort_direction
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = TableState::new(25);
        assert_eq!(state.search_query, "");
        assert_eq!(state.sort_key, None);
        assert_eq!(state.sort_direction, SortDirection::Asc);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 25);
        assert_eq!(TableState::default().page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_search_resets_page() {
        let state = TableState {
            page: 3,
            ..TableState::default()
        };
        let next = reduce(&state, &TableAction::SetSearch("ana".to_string()), 5);
        assert_eq!(next.search_query, "ana");
        assert_eq!(next.page, 1);

        let cleared = reduce(&TableState { page: 2, ..next }, &TableAction::ClearSearch, 5);
        assert_eq!(cleared.search_query, "");
        assert_eq!(cleared.page, 1);
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let state = TableState::default();
        let s1 = reduce(&state, &TableAction::ToggleSort("name".to_string()), 1);
        assert_eq!(s1.sort_key.as_deref(), Some("name"));
        assert_eq!(s1.sort_direction, SortDirection::Asc);

        let s2 = reduce(&s1, &TableAction::ToggleSort("name".to_string()), 1);
        assert_eq!(s2.sort_direction, SortDirection::Desc);

        let s3 = reduce(&s2, &TableAction::ToggleSort("name".to_string()), 1);
        assert_eq!(s3.sort_direction, SortDirection::Asc);

        let s4 = reduce(&s2, &TableAction::ToggleSort("date".to_string()), 1);
        assert_eq!(s4.sort_key.as_deref(), Some("date"));
        assert_eq!(s4.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_keeps_page() {
        let state = TableState {
            page: 4,
            ..TableState::default()
        };
        let next = reduce(&state, &TableAction::ToggleSort("salary".to_string()), 6);
        assert_eq!(next.page, 4);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let state = TableState::default();
        assert_eq!(reduce(&state, &TableAction::GoToPage(0), 3).page, 1);
        assert_eq!(reduce(&state, &TableAction::GoToPage(2), 3).page, 2);
        assert_eq!(reduce(&state, &TableAction::GoToPage(9), 3).page, 3);
        // Empty collection still has one page
        assert_eq!(reduce(&state, &TableAction::GoToPage(9), 0).page, 1);
    }

    #[test]
    fn test_next_and_previous_page() {
        let state = TableState {
            page: 3,
            ..TableState::default()
        };
        assert_eq!(reduce(&state, &TableAction::NextPage, 3).page, 3);
        assert_eq!(reduce(&state, &TableAction::PreviousPage, 3).page, 2);

        let first = TableState::default();
        assert_eq!(reduce(&first, &TableAction::PreviousPage, 3).page, 1);
    }

    #[test]
    fn test_clear_sort_and_page_size() {
        let state = TableState {
            sort_key: Some("name".to_string()),
            sort_direction: SortDirection::Desc,
            page: 2,
            ..TableState::default()
        };
        let unsorted = reduce(&state, &TableAction::ClearSort, 4);
        assert_eq!(unsorted.sort_key, None);
        assert_eq!(unsorted.sort_direction, SortDirection::Asc);
        assert_eq!(unsorted.page, 2);

        let resized = reduce(&state, &TableAction::SetPageSize(0), 4);
        assert_eq!(resized.page_size, 1);
        assert_eq!(resized.page, 1);
    }

    #[test]
    fn test_sort_direction_for() {
        let state = TableState {
            sort_key: Some("name".to_string()),
            sort_direction: SortDirection::Desc,
            ..TableState::default()
        };
        assert_eq!(state.sort_direction_for("name"), Some(SortDirection::Desc));
        assert_eq!(state.sort_direction_for("date"), None);
    }
}
