//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold no
//! business logic, only display-ready text, selection state and highlight ranges.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Rows of the visible window of the active list.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Shown instead of the table when the list is empty.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Modal box drawn over the table.
    pub overlay: Option<OverlayInfo>,

    /// One-shot banner above the footer.
    pub notification: Option<NotificationInfo>,
}

/// How a status value is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// The entity is in normal operation.
    Active,
    /// Suspended or inactive; reversible.
    Held,
    /// Terminal status with no way back.
    Ended,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,

    /// Secondary column: contact details or account figures.
    pub detail: String,

    pub status: &'static str,

    pub tone: StatusTone,

    pub is_selected: bool,

    /// Character ranges of `name` matching the current name search.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Screen name and loaded count, e.g. ` Users (20) `.
    pub title: String,

    /// Filter, pagination and loading markers.
    pub status_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub focused: bool,
}

/// Content of a modal overlay box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayInfo {
    pub title: String,

    /// Menu entries or message lines.
    pub lines: Vec<String>,

    /// Highlighted entry in `lines`, for menus.
    pub selected: Option<usize>,

    /// Text input line, for the edit form.
    pub input: Option<String>,

    /// Key hints shown at the bottom of the box.
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationInfo {
    pub text: String,
    pub is_error: bool,
}
