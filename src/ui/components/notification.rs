//! Notification banner shown above the footer border.

use crate::ui::helpers::{clip, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NotificationInfo;

/// Renders the banner at `row`, or a blank line when there is nothing to show.
pub fn render_notification(row: usize, notification: Option<&NotificationInfo>, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    let Some(notification) = notification else {
        print!("{}", " ".repeat(cols));
        return;
    };

    let (marker, color) = if notification.is_error {
        ("✗ ", &theme.colors.error_fg)
    } else {
        ("✓ ", &theme.colors.info_fg)
    };
    let text = clip(&format!(" {marker}{}", notification.text), cols);

    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(width(&text))));
    print!("{}", Theme::reset());
}
