//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the domain and
//! service layers. It never performs I/O itself: the runtime feeds it events and
//! executes the actions it returns.
//!
//! ```text
//! Keys / Timer / WebRequestResult → Event → handle_event → AppState → Actions
//!                                                                      ↓
//!                                        set_timeout / web_request / hide_self
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Debounced search-and-filter list controller
//! - [`debounce`]: Cancellable debounce over non-cancellable timers
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode, screen and status filter types
//! - [`overlay`]: Status menu, confirmation, role picker and edit form
//! - [`routing`]: Query routing by input shape
//! - [`state`]: Application state and view model computation

pub mod actions;
pub mod controller;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod overlay;
pub mod routing;
pub mod state;

pub use actions::Action;
pub use controller::{FetchPlan, FetchTicket, ListController, Trigger};
pub use debounce::Debouncer;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Screen, SearchFocus, StatusFilter};
pub use overlay::{Overlay, PendingMutation};
pub use routing::{route, QueryRoute};
pub use state::{AppState, Notification, NotificationLevel, Services};
