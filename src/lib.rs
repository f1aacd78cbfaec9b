//! zadmin: a Zellij plugin for administering users, roles and client accounts
//! over a REST backend.
//!
//! - Two list screens (users, accounts) with debounced search and infinite scroll
//! - Queries routed by shape: e-mail, national ID, status name or free-text name
//! - Status transitions, suspension, deletion and field edits behind confirmations
//! - Role grants for users

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, timers, web results
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and overlays                      │
//! │  - List controllers, routing, debounce              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ Service Layer │
//! │ (ui/)         │                     │ (service/)    │
//! │ - Rendering   │                     │ - URLs        │
//! │ - Theming     │                     │ - Requests    │
//! │ - Components  │                     │ - Decoding    │
//! └───────────────┘                     └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure                │
//! │  - User, Account, Role, Page, statuses              │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← optional
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event/action state machine
//! - [`domain`]: Records, statuses, pages and errors
//! - [`service`]: Backend request builders and response decoding
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Sandbox paths
//! - `observability`: OpenTelemetry tracing

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod service;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen, SearchFocus, Services};
pub use domain::{AdminError, Result};
pub use service::Endpoint;
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

/// Backend root used when `base_url` is missing or invalid.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

const DEFAULT_PAGE_SIZE: u32 = app::controller::DEFAULT_PAGE_SIZE;

const DEFAULT_DEBOUNCE: Duration = app::debounce::DEFAULT_WINDOW;

/// Plugin configuration from the Zellij layout.
///
/// ```kdl
/// plugin location="file:/path/to/zadmin.wasm" {
///     base_url "https://admin.example.com/api"
///     page_size "25"
///     debounce_ms "300"
///     start_screen "accounts"
///     theme "catppuccin-latte"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend root. Validated in [`initialize`].
    pub base_url: String,

    /// Records per page. Always at least 1.
    pub page_size: u32,

    /// Idle time before a query or filter change is fetched.
    pub debounce: Duration,

    /// Screen shown on load.
    pub start_screen: Screen,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Custom TOML theme; `~` maps to the sandbox's `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            start_screen: Screen::Users,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses Zellij's configuration map. Missing or unparsable values keep
    /// their defaults.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use zadmin::{Config, Screen};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    /// map.insert("start_screen".to_string(), "accounts".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.debounce.as_millis(), 500);
    /// assert_eq!(config.start_screen, Screen::Accounts);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let page_size = value("page_size")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.page_size);

        let debounce = value("debounce_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .map_or(defaults.debounce, Duration::from_millis);

        let start_screen = value("start_screen")
            .and_then(Screen::from_config)
            .unwrap_or(defaults.start_screen);

        Self {
            base_url: value("base_url").map_or(defaults.base_url, String::from),
            page_size,
            debounce,
            start_screen,
            theme_name: value("theme").map(String::from),
            theme_file: value("theme_file").map(String::from),
            trace_level: value("trace_level").map(String::from),
        }
    }

    /// Parses `base_url`, falling back to [`DEFAULT_BASE_URL`] with a warning.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::parse(&self.base_url).unwrap_or_else(|e| {
            tracing::warn!(base_url = %self.base_url, error = %e, "invalid base_url, using default");
            Endpoint::parse(DEFAULT_BASE_URL).expect("default base URL is a valid http URL")
        })
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state.
///
/// Nothing is fetched yet: the first loads are issued once web access is
/// granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(start_screen = ?config.start_screen, page_size = config.page_size, "initializing zadmin");

    let services = Services::new(&config.endpoint());
    let mut state = AppState::new(services, config.theme(), config.page_size, config.debounce);
    state.screen = config.start_screen;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = Config::from_zellij(&map(&[("page_size", "0"), ("debounce_ms", "-5")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.debounce, DEFAULT_DEBOUNCE);
    }

    #[test]
    fn unknown_start_screen_keeps_users() {
        let config = Config::from_zellij(&map(&[("start_screen", "roles")]));
        assert_eq!(config.start_screen, Screen::Users);
    }

    #[test]
    fn invalid_base_url_falls_back_to_default() {
        let config = Config { base_url: "ftp://nowhere".to_string(), ..Config::default() };
        assert_eq!(config.endpoint(), Endpoint::parse(DEFAULT_BASE_URL).unwrap());
    }

    #[test]
    fn unknown_theme_uses_default() {
        let config = Config { theme_name: Some("neon".to_string()), ..Config::default() };
        assert_eq!(config.theme().name, "catppuccin-mocha");

        let config = Config { theme_name: Some("catppuccin-latte".to_string()), ..Config::default() };
        assert_eq!(config.theme().name, "catppuccin-latte");
    }

    #[test]
    fn initialize_applies_start_screen() {
        let config = Config { start_screen: Screen::Accounts, ..Config::default() };
        let state = initialize(&config);
        assert_eq!(state.screen, Screen::Accounts);
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
