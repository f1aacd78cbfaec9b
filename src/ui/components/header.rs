//! Header component: centered screen title over a dimmed status line.

use crate::ui::helpers::{clip, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the two header rows starting at `row` and returns the next free row.
///
/// ```text
/// [padding]  Users (20)  [padding]
/// [padding] filter: all · name ~ "ana" · more… [padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = width(&header.title).min(cols);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let status_len = width(&header.status_line).min(cols);
    let status_padding = cols.saturating_sub(status_len) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(status_padding));
    print!("{}", clip(&header.status_line, cols));
    print!("{}", " ".repeat(cols.saturating_sub(status_padding + status_len)));
    print!("{}", Theme::reset());

    row + 2
}
