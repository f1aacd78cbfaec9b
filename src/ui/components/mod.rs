//! Composable UI component renderers.
//!
//! - [`header`]: Screen title and status line
//! - [`search`]: Framed query box
//! - [`table`]: NAME / DETAIL / STATUS rows
//! - [`empty`]: Message in place of an empty table
//! - [`overlay`]: Modal menus, confirmations and edit forms
//! - [`notification`]: One-shot banner
//! - [`footer`]: Keybinding hints
//!
//! Screen layout, top to bottom:
//!
//! ```text
//! [blank]
//! [Header title]
//! [Status line]
//! [Border]
//! [Search bar, 3 rows, search mode only]
//! [Table headers]
//! [Table rows or empty state]
//! [Notification]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod notification;
mod overlay;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use notification::render_notification;
use overlay::render_overlay;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Draws a full-width separator at `row`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every section of the view model into a `rows` × `cols` pane.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, theme, cols);
    let table_top = current_row;

    if let Some(empty) = &vm.empty_state {
        render_empty_state(table_top, empty, theme, cols);
    } else {
        render_table_rows(table_top, &vm.display_items, theme, cols);
    }

    if let Some(overlay) = &vm.overlay {
        render_overlay(table_top, overlay, theme, cols);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let notification_row = border_row.saturating_sub(1);

    render_notification(notification_row, vm.notification.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
