//! User actions that move a table between states

use serde::{Deserialize, Serialize};

/// Actions that can trigger state changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableAction {
    /// Search text changed; always returns to the first page
    SetSearch(String),

    /// Sortable column header clicked
    ToggleSort(String),

    /// Jump to a page, clamped to `[1, total_pages]`
    GoToPage(usize),

    NextPage,
    PreviousPage,

    /// Remove the search text; returns to the first page
    ClearSearch,

    /// Back to natural (insertion) order
    ClearSort,

    /// Change the page window size; returns to the first page
    SetPageSize(usize),
}
