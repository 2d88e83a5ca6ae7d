use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use record_table::config::config::DisplayConfig;
use record_table::data::data_view::TableView;

pub fn display_view<T>(view: &TableView<'_, T>, display: &DisplayConfig) {
    if view.rows.is_empty() {
        println!("{}", "No results found.".yellow());
        println!("{}", footer(view).dark_grey());
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut headers: Vec<Cell> = Vec::new();
    if display.show_row_numbers {
        headers.push(Cell::new("#").add_attribute(Attribute::Bold));
    }
    headers.extend(view.headers.iter().map(|header| {
        let text = match header.sort_direction {
            Some(direction) => format!("{} {}", header.label, direction.indicator(display.use_glyphs)),
            None => header.label.clone(),
        };
        Cell::new(text).add_attribute(Attribute::Bold)
    }));
    table.set_header(headers);

    for row in &view.rows {
        let mut cells: Vec<String> = Vec::with_capacity(row.cells.len() + 1);
        if display.show_row_numbers {
            cells.push((row.source_index + 1).to_string());
        }
        cells.extend(row.cells.iter().map(|cell| {
            if cell.text.is_empty() {
                display.null_display.clone()
            } else {
                cell.text.clone()
            }
        }));
        table.add_row(cells);
    }

    println!("{table}");
    println!("{}", footer(view).green());
}

/// Pagination footer, e.g. "Page 2/5 (47 records) | \prev | \next"
fn footer<T>(view: &TableView<'_, T>) -> String {
    let info = &view.page_info;
    let mut parts = vec![format!(
        "Page {}/{} ({} records)",
        info.page, info.total_pages, info.total_items
    )];
    if info.can_go_previous {
        parts.push("\\prev".to_string());
    }
    if info.can_go_next {
        parts.push("\\next".to_string());
    }
    parts.join(" | ")
}

/// Text for the search box: the active query, else the placeholder
///
/// `None` when the table has search turned off.
pub fn search_hint<T>(view: &TableView<'_, T>, query: &str) -> Option<String> {
    if !view.search_enabled {
        return None;
    }
    let query = query.trim();
    if query.is_empty() {
        Some(view.search_placeholder.clone())
    } else {
        Some(format!("/{}", query))
    }
}
