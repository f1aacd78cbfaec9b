//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the two list
//! controllers (users and accounts), the role catalogue, the active screen and
//! input mode, any open overlay, the pending notification and the debouncer that
//! turns rapid input into one fetch per idle window.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` transforms a state snapshot into a renderable
//! [`UIViewModel`]: a table window centered on the selection, header markers for
//! filter, pagination and loading, name-match highlighting, the overlay box and
//! the notification banner.

use super::controller::ListController;
use super::debounce::Debouncer;
use super::modes::{InputMode, Screen, SearchFocus};
use super::overlay::Overlay;
use super::routing::QueryRoute;
use crate::domain::{Account, Entity, Role, StatusKind, User};
use crate::service::{AccountService, Endpoint, RoleService, UserService};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, NotificationInfo, OverlayInfo, SearchBarInfo,
    StatusTone, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::time::Duration;

/// Width of the NAME column, including its trailing gap.
pub const NAME_COLUMN_WIDTH: usize = 32;

/// Width of the STATUS column.
pub const STATUS_COLUMN_WIDTH: usize = 12;

/// Rows taken by chrome in normal mode: blank, header, status line, border,
/// column headers, notification, border, footer.
const NORMAL_CHROME_ROWS: usize = 8;

/// Extra rows taken by the three-line search box.
const SEARCH_BAR_ROWS: usize = 3;

/// Request builders for every backend collection.
#[derive(Debug, Clone)]
pub struct Services {
    pub users: UserService,
    pub accounts: AccountService,
    pub roles: RoleService,
}

impl Services {
    #[must_use]
    pub fn new(endpoint: &Endpoint) -> Self {
        Self {
            users: UserService::users(endpoint.clone()),
            accounts: AccountService::accounts(endpoint.clone()),
            roles: RoleService::new(endpoint.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// One-shot banner, cleared by the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

/// Central application state container.
///
/// Mutated only by the event handler, from the plugin's single-threaded update
/// loop.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Screen currently shown; Tab toggles it.
    pub screen: Screen,

    /// Keybinding interpretation for the active screen.
    pub input_mode: InputMode,

    pub users: ListController<User>,

    pub accounts: ListController<Account>,

    /// Role catalogue for the role picker, loaded once permissions are granted.
    pub roles: Vec<Role>,

    /// Modal box capturing input, if open.
    pub overlay: Option<Overlay>,

    pub notification: Option<Notification>,

    /// One debounce window per screen.
    pub debouncer: Debouncer<Screen>,

    pub services: Services,

    pub theme: Theme,

    /// Set once Zellij grants web access. Until then fetch plans are released
    /// unsent and the controllers stay idle.
    pub permissions_granted: bool,
}

impl AppState {
    #[must_use]
    pub fn new(services: Services, theme: Theme, page_size: u32, debounce: Duration) -> Self {
        Self {
            screen: Screen::Users,
            input_mode: InputMode::Normal,
            users: ListController::new(page_size),
            accounts: ListController::new(page_size),
            roles: Vec::new(),
            overlay: None,
            notification: None,
            debouncer: Debouncer::new(debounce),
            services,
            theme,
            permissions_granted: false,
        }
    }

    pub fn notify_info(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification { level: NotificationLevel::Info, text: text.into() });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!(message = %text, "error notification raised");
        self.notification = Some(Notification { level: NotificationLevel::Error, text });
    }

    /// Query text of the active screen's list.
    #[must_use]
    pub fn active_query(&self) -> &str {
        match self.screen {
            Screen::Users => self.users.query(),
            Screen::Accounts => self.accounts.query(),
        }
    }

    /// Computes a renderable view model for the given terminal size.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] with the visible window of the active list, header and
    /// footer text, the search bar, and any open overlay or notification.
    ///
    /// # Windowing
    ///
    /// 1. Subtract the chrome (header, borders, search bar, table headers, banner)
    /// 2. Center the window on the selection
    /// 3. Clamp at either end of the list so the window stays full
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let available = self.available_rows(rows);
        let (header, display_items, selected_index, empty_state) = match self.screen {
            Screen::Users => self.list_view(&self.users, available, cols),
            Screen::Accounts => self.list_view(&self.accounts, available, cols),
        };

        UIViewModel {
            display_items,
            selected_index,
            header,
            footer: self.compute_footer(),
            empty_state,
            search_bar: self.compute_search_bar(),
            overlay: self.overlay.as_ref().map(|overlay| self.compute_overlay(overlay)),
            notification: self.notification.as_ref().map(|n| NotificationInfo {
                text: n.text.clone(),
                is_error: n.level == NotificationLevel::Error,
            }),
        }
    }

    fn list_view<E: Entity>(
        &self,
        list: &ListController<E>,
        available_rows: usize,
        cols: usize,
    ) -> (HeaderInfo, Vec<DisplayItem>, usize, Option<EmptyState>) {
        let header = Self::compute_header(self.screen, list);
        let items = list.items();
        if items.is_empty() {
            return (header, vec![], 0, Some(Self::compute_empty_state(list)));
        }

        let selected = list.selected_index().min(items.len() - 1);
        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(items.len());
        if visible_end - visible_start < available_rows && items.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let needle = list.route().and_then(QueryRoute::highlight_text);
        let matcher = needle.map(|_| SkimMatcherV2::default());
        let detail_width = cols.saturating_sub(NAME_COLUMN_WIDTH + STATUS_COLUMN_WIDTH + 1);

        let display_items = items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, entity)| {
                let highlight_ranges = match (&matcher, needle) {
                    (Some(m), Some(text)) => highlight_ranges(m, entity.title(), text),
                    _ => vec![],
                };
                let status = entity.status();
                DisplayItem {
                    name: truncate(entity.title(), NAME_COLUMN_WIDTH - 2),
                    detail: truncate(&entity.detail(), detail_width),
                    status: status.label(),
                    tone: tone_of(status),
                    is_selected: visible_start + offset == selected,
                    highlight_ranges,
                }
            })
            .collect();

        (header, display_items, selected - visible_start, None)
    }

    fn compute_header<E: Entity>(screen: Screen, list: &ListController<E>) -> HeaderInfo {
        let mut status_line = format!("filter: {}", list.filter().label());
        if let Some(route) = list.route() {
            status_line.push_str(&format!(" · {}", route_label(route)));
        }
        if list.is_loaded() && !list.is_last() {
            status_line.push_str(" · more…");
        }
        if list.is_in_flight() {
            status_line.push_str(" · loading…");
        }
        HeaderInfo {
            title: format!(" {} ({}) ", screen.title(), list.items().len()),
            status_line,
        }
    }

    fn compute_empty_state<E: Entity>(list: &ListController<E>) -> EmptyState {
        if !list.is_loaded() || list.is_in_flight() {
            EmptyState {
                message: "Loading…".to_string(),
                subtitle: "Waiting for the backend".to_string(),
            }
        } else if list.query().trim().is_empty() {
            EmptyState {
                message: "No records".to_string(),
                subtitle: "Press f to change the filter or r to reload".to_string(),
            }
        } else {
            EmptyState {
                message: "No records".to_string(),
                subtitle: format!("Nothing matches \"{}\"", list.query().trim()),
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.overlay, self.input_mode) {
            (Some(Overlay::EditForm { .. }), _) => "↑/↓: field  Enter: save  Esc: cancel".to_string(),
            (Some(Overlay::Confirm { .. }), _) => "Enter: confirm  Esc: cancel".to_string(),
            (Some(_), _) => "j/k: move  Enter: select  Esc: cancel".to_string(),
            (None, InputMode::Search(SearchFocus::Typing)) => {
                "Esc: clear search  Enter: search now  Type to filter".to_string()
            }
            (None, InputMode::Search(SearchFocus::Navigating)) => {
                "Esc: clear search  /: edit query  j/k: navigate  s/S/D/e: actions".to_string()
            }
            (None, InputMode::Normal) => match self.screen {
                Screen::Users => {
                    "j/k: move  /: search  f: filter  r: reload  s: status  S: suspend  D: delete  e: edit  R: role  Tab: accounts  q: quit"
                        .to_string()
                }
                Screen::Accounts => {
                    "j/k: move  /: search  f: filter  r: reload  s: status  S: suspend  D: delete  e: edit  Tab: users  q: quit"
                        .to_string()
                }
            },
        };
        FooterInfo { keybindings }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.active_query().to_string(),
                focused: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_overlay(&self, overlay: &Overlay) -> OverlayInfo {
        match overlay {
            Overlay::StatusMenu { title, options, selected, .. } => {
                if options.is_empty() {
                    return OverlayInfo {
                        title: title.clone(),
                        lines: vec!["No status change is possible".to_string()],
                        selected: None,
                        input: None,
                        hint: "Esc: close".to_string(),
                    };
                }
                OverlayInfo {
                    title: title.clone(),
                    lines: options
                        .iter()
                        .map(|o| if o.terminal { format!("{} (final)", o.label) } else { o.label.to_string() })
                        .collect(),
                    selected: Some(*selected),
                    input: None,
                    hint: "j/k: move  Enter: apply  Esc: cancel".to_string(),
                }
            }
            Overlay::Confirm { prompt, .. } => OverlayInfo {
                title: "Confirm".to_string(),
                lines: vec![prompt.clone()],
                selected: None,
                input: None,
                hint: "Enter: confirm  Esc: cancel".to_string(),
            },
            Overlay::RolePicker { title, selected, .. } => OverlayInfo {
                title: title.clone(),
                lines: if self.roles.is_empty() {
                    vec!["No roles loaded".to_string()]
                } else {
                    self.roles
                        .iter()
                        .map(|role| match &role.description {
                            Some(description) => format!("{} · {description}", role.name),
                            None => role.name.clone(),
                        })
                        .collect()
                },
                selected: (!self.roles.is_empty()).then_some(*selected),
                input: None,
                hint: "j/k: move  Enter: grant  Esc: cancel".to_string(),
            },
            Overlay::EditForm { title, fields, field, buffer, .. } => OverlayInfo {
                title: title.clone(),
                lines: fields.iter().map(|f| f.label.to_string()).collect(),
                selected: Some(*field),
                input: Some(buffer.clone()),
                hint: "↑/↓: field  Enter: save  Esc: cancel".to_string(),
            },
        }
    }

    const fn available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(NORMAL_CHROME_ROWS),
            InputMode::Search(_) => total_rows.saturating_sub(NORMAL_CHROME_ROWS + SEARCH_BAR_ROWS),
        }
    }
}

fn tone_of<S: StatusKind>(status: S) -> StatusTone {
    if status.transitions().is_empty() {
        StatusTone::Ended
    } else if S::ALL.first() == Some(&status) {
        StatusTone::Active
    } else {
        StatusTone::Held
    }
}

fn route_label<S: StatusKind>(route: &QueryRoute<S>) -> String {
    match route {
        QueryRoute::ExactEmail(email) => format!("e-mail {email}"),
        QueryRoute::ExactNationalId(id) => format!("national id {id}"),
        QueryRoute::NameContains(text) => format!("name ~ \"{text}\""),
        QueryRoute::ByStatus(status) => format!("status {}", status.label()),
        QueryRoute::Listing => "all records".to_string(),
    }
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Coalesces fuzzy match positions into contiguous `(start, end)` ranges.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, pattern: &str) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, pattern) else {
        return vec![];
    };
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Page, UserStatus};

    fn state() -> AppState {
        let endpoint = Endpoint::parse("http://backend/api").unwrap();
        AppState::new(Services::new(&endpoint), Theme::default(), 10, Duration::from_millis(500))
    }

    fn user(id: i64, name: &str, status: UserStatus) -> User {
        User {
            id,
            name: name.into(),
            email: format!("{id}@corp.cl"),
            national_id: "12345678-9".into(),
            phone: None,
            status,
            roles: vec![],
            created_at: None,
        }
    }

    fn load(state: &mut AppState, users: Vec<User>, last: bool) {
        let plan = state.users.begin_reset();
        state.users.complete(plan.ticket, Ok(Page { content: users, last })).unwrap();
    }

    #[test]
    fn empty_list_shows_loading_before_first_response() {
        let vm = state().compute_viewmodel(24, 100);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("Loading…".to_string()));
        assert!(vm.display_items.is_empty());
    }

    #[test]
    fn header_marks_more_pages() {
        let mut state = state();
        load(&mut state, vec![user(1, "Ana", UserStatus::Active)], false);
        let vm = state.compute_viewmodel(24, 100);
        assert_eq!(vm.header.title, " Users (1) ");
        assert!(vm.header.status_line.contains("more…"));
        assert_eq!(vm.display_items[0].tone, StatusTone::Active);
    }

    #[test]
    fn name_search_highlights_matches() {
        let mut state = state();
        state.users.set_query("mar");
        load(&mut state, vec![user(1, "Maria Soto", UserStatus::Suspended)], true);
        let vm = state.compute_viewmodel(24, 100);
        let item = &vm.display_items[0];
        assert_eq!(item.highlight_ranges, vec![(0, 3)]);
        assert_eq!(item.tone, StatusTone::Held);
    }

    #[test]
    fn window_follows_selection() {
        let mut state = state();
        let users = (0..50).map(|i| user(i, &format!("user {i}"), UserStatus::Active)).collect();
        load(&mut state, users, true);
        for _ in 0..40 {
            state.users.move_down();
        }
        let vm = state.compute_viewmodel(24, 100);
        assert_eq!(vm.display_items.len(), 16);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].name, "user 40");
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
    }
}
