//! Plain-text rendering of a [`TableView`] whose cells are strings.

use super::column::Alignment;
use super::data_table::{Cell, HeaderCell, TableBody, TableView};
use super::sort::SortIndicator;
use crate::constants::{DEFAULT_EMPTY_MESSAGE, SKELETON_CELL};
use crate::helpers::{display_width, truncate_to_width};

const COLUMN_GAP: &str = "  ";

fn sort_glyph(indicator: SortIndicator) -> &'static str {
    match indicator {
        SortIndicator::Ascending => "↑",
        SortIndicator::Descending => "↓",
        SortIndicator::Unsorted => "↕",
    }
}

fn header_label(header: &HeaderCell<'_>) -> String {
    match header.sort {
        Some(indicator) => format!("{} {}", header.header, sort_glyph(indicator)),
        None => header.header.to_string(),
    }
}

fn cell_text(cell: &Cell<String>) -> &str {
    match cell {
        Cell::Content(text) => text,
        Cell::Skeleton => SKELETON_CELL,
        Cell::Blank => "",
    }
}

fn pad(text: &str, width: usize, align: Alignment) -> String {
    let text = truncate_to_width(text, width);
    let gap = width.saturating_sub(display_width(&text));
    let (left, right) = match align {
        Alignment::Left => (0, gap),
        Alignment::Right => (gap, 0),
        Alignment::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn join_line(cells: Vec<String>) -> String {
    cells.join(COLUMN_GAP).trim_end().to_string()
}

/// Render the view as an aligned plain-text table.
///
/// The header line carries sort glyphs, a rule separates it from the body,
/// and the empty state is centred across the full table width.
pub fn render_text(view: &TableView<'_, String>) -> String {
    let labels: Vec<String> = view.headers.iter().map(header_label).collect();

    let mut content_widths: Vec<usize> = labels.iter().map(|l| display_width(l)).collect();
    match &view.body {
        TableBody::Rows(rows) => {
            for row in rows {
                for (width, cell) in content_widths.iter_mut().zip(&row.cells) {
                    *width = (*width).max(display_width(cell_text(cell)));
                }
            }
        }
        TableBody::Skeleton { .. } => {
            for width in content_widths.iter_mut() {
                *width = (*width).max(display_width(SKELETON_CELL));
            }
        }
        TableBody::Empty { .. } => {}
    }

    let widths: Vec<usize> = view
        .headers
        .iter()
        .zip(&content_widths)
        .map(|(header, &content)| header.width.resolve(content))
        .collect();
    let total_width =
        widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);

    let mut lines = Vec::new();
    lines.push(join_line(
        view.headers
            .iter()
            .zip(&labels)
            .zip(&widths)
            .map(|((header, label), &width)| pad(label, width, header.align))
            .collect(),
    ));
    lines.push("─".repeat(total_width));

    match &view.body {
        TableBody::Skeleton { rows } => {
            for _ in 0..*rows {
                lines.push(join_line(
                    widths
                        .iter()
                        .map(|&w| pad(SKELETON_CELL, w, Alignment::Left))
                        .collect(),
                ));
            }
        }
        TableBody::Rows(rows) => {
            for row in rows {
                lines.push(join_line(
                    view.headers
                        .iter()
                        .zip(&row.cells)
                        .zip(&widths)
                        .map(|((header, cell), &width)| pad(cell_text(cell), width, header.align))
                        .collect(),
                ));
            }
        }
        TableBody::Empty { fallback } => {
            let message = fallback.map_or(DEFAULT_EMPTY_MESSAGE, String::as_str);
            let width = total_width.max(display_width(message));
            lines.push(join_line(vec![pad(message, width, Alignment::Center)]));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::composite::data_table::{Column, DataTable, SortDescriptor, SortKey};

    #[derive(Clone)]
    struct Fruit {
        name: &'static str,
        qty: u32,
    }

    fn fruit_table() -> DataTable<Fruit, String> {
        let columns = vec![
            Column::new("name", "Name")
                .render(|f: &Fruit| f.name.to_string())
                .sort_by(|f| SortKey::from(f.name)),
            Column::new("qty", "Qty")
                .render(|f: &Fruit| f.qty.to_string())
                .align(Alignment::Right),
        ];
        DataTable::new(columns, |f: &Fruit| f.name.to_string())
            .with_data(vec![Fruit { name: "pear", qty: 3 }, Fruit { name: "apple", qty: 12 }])
            .with_filter(|f: &Fruit, q: &String| f.name.contains(q.as_str()))
    }

    #[test]
    fn renders_header_rule_and_rows() {
        let mut table = fruit_table().with_default_sort(Some(SortDescriptor::ascending("name")));
        let text = render_text(&table.view());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Name ↑  Qty");
        assert_eq!(lines[1], "─".repeat(11));
        assert_eq!(lines[2], "apple    12");
        assert_eq!(lines[3], "pear      3");
    }

    #[test]
    fn renders_empty_state_message() {
        let mut table = fruit_table().with_empty_fallback("Nothing here".to_string());
        table.set_filter_state("kiwi".to_string());
        let text = render_text(&table.view());
        assert_eq!(text.lines().last(), Some("Nothing here"));
    }

    #[test]
    fn renders_skeleton_rows() {
        let mut table = fruit_table().with_data(Vec::new()).with_skeleton_rows(2);
        table.set_loading(true);
        let text = render_text(&table.view());
        let body: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(body.len(), 2);
        assert!(body.iter().all(|line| line.starts_with(SKELETON_CELL)));
    }
}
