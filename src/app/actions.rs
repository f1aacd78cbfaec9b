//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never touches Zellij directly. It returns a list of
//! [`Action`]s which `main.rs` executes in order: scheduling timers, issuing web
//! requests and hiding the pane.

use crate::service::ServiceRequest;
use std::time::Duration;

/// Commands produced by the event handler for the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Schedules a `Timer` event after the given delay.
    ///
    /// Emitted whenever a debounce window is (re)armed.
    SetTimeout {
        /// Delay in seconds, as `set_timeout` expects.
        seconds: f64,
    },

    /// Issues an HTTP request; the response comes back as a web result event
    /// carrying the request's context.
    Request(ServiceRequest),
}

impl Action {
    #[must_use]
    pub fn timeout(delay: Duration) -> Self {
        Self::SetTimeout { seconds: delay.as_secs_f64() }
    }
}
