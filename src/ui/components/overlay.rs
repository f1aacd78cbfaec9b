//! Modal overlay box drawn over the table.

use crate::ui::helpers::{clip, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::OverlayInfo;

/// Widest the box grows, frame included.
const MAX_BOX_WIDTH: usize = 60;

/// Draws `overlay` centered horizontally with its top edge at `top`.
///
/// ```text
/// ┌─ Change status of Ana ───────────┐
/// │ ▸ active                         │
/// │   inactive                       │
/// │   closed (final)                 │
/// │                                  │
/// │ j/k: move  Enter: apply  Esc     │
/// └──────────────────────────────────┘
/// ```
///
/// Edit forms add an input line below the field list.
pub fn render_overlay(top: usize, overlay: &OverlayInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_BOX_WIDTH);
    if box_width < 8 {
        return;
    }
    let inner = box_width - 2;
    let left = (cols - box_width) / 2 + 1;
    let border = &theme.colors.overlay_border;

    let title = clip(&format!(" {} ", overlay.title), inner.saturating_sub(1));
    position_cursor(top, left);
    print!("{}", Theme::fg(border));
    print!("┌─{title}{}┐", "─".repeat(inner.saturating_sub(width(&title) + 1)));
    print!("{}", Theme::reset());

    let mut row = top + 1;
    for (idx, line) in overlay.lines.iter().enumerate() {
        let is_selected = overlay.selected == Some(idx);
        let marker = if is_selected { "▸ " } else { "  " };
        let text = clip(&format!(" {marker}{line}"), inner);
        let style = if is_selected && overlay.input.is_none() {
            format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
        } else if is_selected {
            format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))
        } else {
            Theme::fg(&theme.colors.text_normal)
        };
        framed_line(row, left, inner, &text, &style, border);
        row += 1;
    }

    if let Some(input) = &overlay.input {
        framed_line(row, left, inner, "", "", border);
        row += 1;
        let text = clip(&format!(" > {input}▏"), inner);
        framed_line(row, left, inner, &text, &Theme::fg(&theme.colors.search_bar_border), border);
        row += 1;
    }

    framed_line(row, left, inner, "", "", border);
    row += 1;
    let hint = clip(&format!(" {}", overlay.hint), inner);
    framed_line(row, left, inner, &hint, &Theme::fg(&theme.colors.text_dim), border);
    row += 1;

    position_cursor(row, left);
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner));
    print!("{}", Theme::reset());
}

fn framed_line(row: usize, left: usize, inner: usize, text: &str, style: &str, border: &str) {
    position_cursor(row, left);
    print!("{}│{}", Theme::fg(border), Theme::reset());
    print!("{style}{text}{}", " ".repeat(inner.saturating_sub(width(text))));
    print!("{}{}│{}", Theme::reset(), Theme::fg(border), Theme::reset());
}
