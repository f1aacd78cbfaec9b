//! Table component: NAME, DETAIL and STATUS columns.

use crate::app::state::{NAME_COLUMN_WIDTH, STATUS_COLUMN_WIDTH};
use crate::ui::helpers::{self, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the column headers at `row`.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let detail_width = cols.saturating_sub(NAME_COLUMN_WIDTH + STATUS_COLUMN_WIDTH);
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<name$}{:<detail$}{:<status$}",
        "NAME",
        "DETAIL",
        "STATUS",
        name = NAME_COLUMN_WIDTH,
        detail = detail_width,
        status = STATUS_COLUMN_WIDTH,
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row from `row` down and returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row, padded to the full width so the selection background is
/// continuous.
///
/// The status cell takes its tone color unless the row is selected.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };
    print!("{}", Theme::fg(base));

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(width(&item.name))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    let detail_width = cols.saturating_sub(NAME_COLUMN_WIDTH + STATUS_COLUMN_WIDTH);
    print!("{}", item.detail);
    print!("{}", " ".repeat(detail_width.saturating_sub(width(&item.detail))));

    if !item.is_selected {
        print!("{}", Theme::fg(theme.status_color(item.tone)));
    }
    print!("{}", item.status);

    let line_len = NAME_COLUMN_WIDTH.max(width(&item.name))
        + detail_width.max(width(&item.detail))
        + width(item.status);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
