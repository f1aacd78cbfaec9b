//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zadmin library and the Zellij plugin
//! API: it maps Zellij events to library events and executes the actions the
//! library returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: Request `WebAccess`; the first loads start once granted
//! 3. **Update**: Map events, delegate to `handle_event`, execute actions
//! 4. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → mode-dependent [`Event`] (see keybindings)
//! - `Timer` → `Event::Timer`
//! - `WebRequestResult` → `Event::WebResponse`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//!
//! Normal mode:
//! - `j`/`k`: Move
//! - `/`: Search
//! - `f`: Cycle status filter
//! - `r`: Reload
//! - `s`: Change status, `S`: Suspend, `D`: Delete, `e`: Edit
//! - `R`: Grant role (users screen)
//! - `Tab`: Switch screen
//! - `q` / `Esc`: Close plugin
//!
//! Search mode, typing: characters edit the query, `Enter` searches now and
//! moves to the results, `Esc` clears the search.
//!
//! Search mode, navigating: as normal mode, plus `/` to edit the query again and
//! `Esc` to clear the search.
//!
//! Overlays: `j`/`k` move in menus, characters edit the field in edit forms,
//! `Enter` confirms and `Esc` cancels.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zadmin::app::Overlay;
use zadmin::service::Method;
use zadmin::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    app: zadmin::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zadmin::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zadmin::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "parsed configuration");
        self.app = zadmin::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Returns `true` when the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::WebResponse { status, body, context }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => Event::PermissionsResult {
                granted: matches!(permissions, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zadmin::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps a key press according to the open overlay and input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match key.bare_key {
            BareKey::Down => return Some(Event::KeyDown),
            BareKey::Up => return Some(Event::KeyUp),
            _ => {}
        }

        if let Some(overlay) = &self.app.overlay {
            return Self::map_overlay_key(overlay, key.bare_key);
        }

        match self.app.input_mode {
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => match key.bare_key {
                BareKey::Char('/') => Some(Event::FocusSearchBar),
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Char('q') => None,
                other => Self::map_list_key(other),
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Char('/') => Some(Event::SearchMode),
                BareKey::Char('q') | BareKey::Esc => Some(Event::CloseFocus),
                other => Self::map_list_key(other),
            },
        }
    }

    fn map_overlay_key(overlay: &Overlay, key: BareKey) -> Option<Event> {
        let editing = matches!(overlay, Overlay::EditForm { .. });
        Some(match key {
            BareKey::Enter => Event::Confirm,
            BareKey::Esc => Event::Cancel,
            BareKey::Backspace if editing => Event::Backspace,
            BareKey::Tab if editing => Event::KeyDown,
            BareKey::Char(c) if editing => Event::Char(c),
            BareKey::Char('j') => Event::KeyDown,
            BareKey::Char('k') => Event::KeyUp,
            _ => return None,
        })
    }

    /// Keys shared by normal mode and search results navigation.
    fn map_list_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Char('j') => Event::KeyDown,
            BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('f') => Event::CycleFilter,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('s') => Event::OpenStatusMenu,
            BareKey::Char('S') => Event::Suspend,
            BareKey::Char('D') => Event::Delete,
            BareKey::Char('e') => Event::Edit,
            BareKey::Char('R') => Event::OpenRolePicker,
            BareKey::Tab => Event::SwitchScreen,
            _ => return None,
        })
    }

    /// Translates a library action into Zellij API calls.
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin pane");
                hide_self();
            }
            Action::SetTimeout { seconds } => set_timeout(*seconds),
            Action::Request(request) => {
                let context = match request.context.to_map() {
                    Ok(context) => context,
                    Err(e) => {
                        tracing::warn!(url = %request.call.url, error = %e, "could not encode request context, dropping request");
                        return;
                    }
                };
                let verb = match request.call.method {
                    Method::Get => HttpVerb::Get,
                    Method::Post => HttpVerb::Post,
                    Method::Put => HttpVerb::Put,
                    Method::Delete => HttpVerb::Delete,
                };
                tracing::debug!(method = ?request.call.method, url = %request.call.url, "issuing web request");
                web_request(&request.call.url, verb, request.headers(), request.body_bytes(), context);
            }
        }
    }
}
