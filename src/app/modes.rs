//! Input, screen and filter state types.
//!
//! # State Machine
//!
//! The console operates in one of two input modes:
//! - **Normal**: navigation and record actions
//! - **Search**: editing the query (typing) or browsing its results (navigating)
//!
//! Independently, one of two screens is shown, each backed by its own list
//! controller, and each list carries a categorical [`StatusFilter`].

use crate::domain::StatusKind;
use crate::service::Resource;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes edit the query; each edit restarts the debounce window.
    Typing,

    /// Keystrokes move through results; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and record actions (status, suspend, delete, edit, roles).
    Normal,

    /// Active search with focus state.
    Search(SearchFocus),
}

/// Which collection is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Users,
    Accounts,
}

impl Screen {
    /// The other screen (Tab toggles between the two).
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Users => Self::Accounts,
            Self::Accounts => Self::Users,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Accounts => "Accounts",
        }
    }

    /// Singular noun for notifications.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Users => "User",
            Self::Accounts => "Account",
        }
    }

    #[must_use]
    pub const fn resource(self) -> Resource {
        match self {
            Self::Users => Resource::Users,
            Self::Accounts => Resource::Accounts,
        }
    }

    /// Screen that lists a resource, if any. Roles have no screen of their own.
    #[must_use]
    pub const fn for_resource(resource: Resource) -> Option<Self> {
        match resource {
            Resource::Users => Some(Self::Users),
            Resource::Accounts => Some(Self::Accounts),
            Resource::Roles => None,
        }
    }

    /// Parses a `start_screen` configuration value.
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "users" => Some(Self::Users),
            "accounts" => Some(Self::Accounts),
            _ => None,
        }
    }
}

/// Categorical filter on entity status; `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S: StatusKind> StatusFilter<S> {
    /// Next filter in the cycle `All → each status in order → All`.
    #[must_use]
    pub fn next(self) -> Self {
        let all = S::ALL;
        match self {
            Self::All => all.first().map_or(Self::All, |s| Self::Only(*s)),
            Self::Only(current) => all
                .iter()
                .position(|s| *s == current)
                .and_then(|i| all.get(i + 1))
                .map_or(Self::All, |s| Self::Only(*s)),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.label(),
        }
    }
}
