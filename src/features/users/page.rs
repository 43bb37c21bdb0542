//! Users Page
//!
//! Renders the users table, its footer and the load error view as text.

use super::controller::UsersTable;
use crate::components::composite::data_table::render_text;
use crate::states::UsersLoadState;

/// Message shown in place of the table when loading failed
pub fn render_error(message: &str) -> String {
    format!("Failed to load users: {message}")
}

/// Footer line, e.g. "1 - 10 of 42  page 1 / 5  rows per page: 5 10 [20] 30"
fn render_footer(table: &mut UsersTable) -> Option<String> {
    let footer = table.footer()?;
    let options: Vec<String> = table
        .page_size_options()
        .iter()
        .map(|&size| {
            if size == table.limit() {
                format!("[{size}]")
            } else {
                size.to_string()
            }
        })
        .collect();

    let mut line = footer.to_string();
    if !options.is_empty() {
        line.push_str("  rows per page: ");
        line.push_str(&options.join(" "));
    }
    Some(line)
}

/// Whole page: error view, or table followed by the footer when there are rows
pub fn render_page(table: &mut UsersTable) -> String {
    if let UsersLoadState::Error(message) = table.load_state() {
        return render_error(message);
    }

    let mut out = render_text(&table.view());
    if let Some(footer) = render_footer(table) {
        out.push_str("\n\n");
        out.push_str(&footer);
    }
    out
}
