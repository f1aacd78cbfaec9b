//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything the plugin runtime
//! observes: key presses (already mapped to [`Event`]s by `main.rs`), timer
//! expirations, permission results and web request results. It mutates
//! [`AppState`] and returns `(should_render, actions)`.
//!
//! # Event Flow
//!
//! - **Input** (query edits, filter cycling, reload) arms the active screen's
//!   debounce window and emits a `SetTimeout`.
//! - **Timer** consumes one debounce ticket; if it is still live the screen's
//!   controller issues a reset fetch.
//! - **Navigation** near the end of the list asks the controller for the next page.
//! - **Record actions** open overlays; confirming one issues a single mutation.
//! - **Web results** are routed by their request context to the owning controller
//!   (fetches), to the notification banner and a debounced reload (mutations), or
//!   to the role catalogue.
//!
//! No backend failure escapes as an error: each becomes a notification and the
//! previous state stays usable.

use super::controller::{Applied, FetchPlan, FetchTicket, ListController, Trigger};
use super::debounce::Debouncer;
use super::modes::{InputMode, Screen, SearchFocus};
use super::overlay::{Overlay, PendingMutation};
use super::routing;
use crate::app::{Action, AppState};
use crate::domain::error::{AdminError, Result};
use crate::domain::{Entity, Page, StatusKind};
use crate::service::response;
use crate::service::{
    EntityService, HttpCall, MutationKind, Purpose, RequestContext, Resource, ResponseShape,
};
use std::collections::BTreeMap;

/// Events triggered by user input, timers or backend responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection (or overlay cursor) down.
    KeyDown,
    /// Moves the selection (or overlay cursor) up.
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Toggles between the users and accounts screens.
    SwitchScreen,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Returns focus to the query from the results.
    FocusSearchBar,
    /// Fetches the current query now, bypassing the debounce.
    SubmitSearch,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Typed character for the query or the edit form.
    Char(char),
    Backspace,
    /// Cycles the status filter.
    CycleFilter,
    /// Reloads the active list without changing query or filter.
    Refresh,
    OpenStatusMenu,
    Suspend,
    Delete,
    Edit,
    /// Opens the role picker for the selected user.
    OpenRolePicker,
    /// Enter inside an overlay.
    Confirm,
    /// Esc inside an overlay.
    Cancel,

    /// A `set_timeout` expiration.
    Timer,

    PermissionsResult {
        granted: bool,
    },

    /// A completed web request, with the context it was issued with.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },
}

impl Event {
    /// Whether the event comes from a key press.
    #[must_use]
    pub const fn is_key(&self) -> bool {
        !matches!(self, Self::Timer | Self::PermissionsResult { .. } | Self::WebResponse { .. })
    }
}

/// Runs `$body` with `$list` and `$service` bound to the given screen's
/// controller and service wrapper. Other fields of `$state` stay borrowable.
macro_rules! on_list {
    ($state:ident, $screen:expr, |$list:ident, $service:ident| $body:expr) => {
        match $screen {
            Screen::Users => {
                let $list = &mut $state.users;
                let $service = &$state.services.users;
                $body
            }
            Screen::Accounts => {
                let $list = &mut $state.accounts;
                let $service = &$state.services.accounts;
                $body
            }
        }
    };
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI should re-render.
///
/// # Errors
///
/// Backend and request-building failures are turned into notifications; an error
/// is returned only for conditions the runtime should log.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    let cleared = event.is_key() && state.notification.take().is_some();
    if state.overlay.is_some() && event.is_key() {
        return handle_overlay_key(state, event);
    }

    let screen = state.screen;
    let online = state.permissions_granted;
    let (render, actions) = match event {
        Event::KeyDown => {
            let result = on_list!(state, screen, |list, service| {
                if list.move_down() {
                    list.near_end().and_then(|plan| dispatch(online, list, service, plan))
                } else {
                    None
                }
            });
            (true, settle(state, result))
        }
        Event::KeyUp => {
            on_list!(state, screen, |list, _service| list.move_up());
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::SwitchScreen => {
            state.screen = screen.toggled();
            state.input_mode = InputMode::Normal;
            let target = state.screen;
            let result = on_list!(state, target, |list, service| {
                if online && !list.is_loaded() && !list.is_in_flight() {
                    let plan = list.begin_reset();
                    dispatch(online, list, service, plan)
                } else {
                    None
                }
            });
            (true, settle(state, result))
        }
        Event::SearchMode | Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            (true, vec![])
        }
        Event::SubmitSearch => {
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            state.debouncer.cancel(screen);
            let result = on_list!(state, screen, |list, service| {
                let plan = list.begin_reset();
                dispatch(online, list, service, plan)
            });
            (true, settle(state, result))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            state.debouncer.cancel(screen);
            let result = on_list!(state, screen, |list, service| {
                if list.query().is_empty() {
                    None
                } else {
                    let plan = list.clear_query();
                    dispatch(online, list, service, plan)
                }
            });
            (true, settle(state, result))
        }
        Event::Char(c) if state.input_mode == InputMode::Search(SearchFocus::Typing) => {
            let result = on_list!(state, screen, |list, service| {
                let trigger = list.push_char(*c);
                apply_trigger(online, list, service, &mut state.debouncer, screen, trigger)
            });
            (true, settle(state, result))
        }
        Event::Backspace if state.input_mode == InputMode::Search(SearchFocus::Typing) => {
            let result = on_list!(state, screen, |list, service| {
                list.pop_char()
                    .and_then(|trigger| apply_trigger(online, list, service, &mut state.debouncer, screen, trigger))
            });
            (true, settle(state, result))
        }
        Event::CycleFilter => {
            let result = on_list!(state, screen, |list, service| {
                let trigger = list.cycle_filter();
                apply_trigger(online, list, service, &mut state.debouncer, screen, trigger)
            });
            (true, settle(state, result))
        }
        Event::Refresh => (true, schedule_refresh(state, screen)),
        Event::OpenStatusMenu => {
            state.overlay = on_list!(state, screen, |list, _service| list.selected().map(Overlay::status_menu));
            (state.overlay.is_some(), vec![])
        }
        Event::Suspend => {
            let selected = on_list!(state, screen, |list, _service| list.selected().map(describe));
            match selected {
                Some(target) if target.status == "SUSPENDED" => {
                    state.notify_info(format!("{} {} is already suspended", screen.noun(), target.id));
                }
                Some(target) => {
                    state.overlay = Some(Overlay::Confirm {
                        prompt: format!("Suspend {} {} (#{})?", screen.noun().to_lowercase(), target.title, target.id),
                        pending: PendingMutation::Suspend { id: target.id },
                    });
                }
                None => {}
            }
            (true, vec![])
        }
        Event::Delete => {
            let selected = on_list!(state, screen, |list, _service| list.selected().map(describe));
            if let Some(target) = selected {
                state.overlay = Some(Overlay::Confirm {
                    prompt: format!(
                        "Delete {} {} (#{})? This cannot be undone.",
                        screen.noun().to_lowercase(),
                        target.title,
                        target.id
                    ),
                    pending: PendingMutation::Delete { id: target.id },
                });
            }
            (true, vec![])
        }
        Event::Edit => {
            state.overlay = on_list!(state, screen, |list, _service| list.selected().map(Overlay::edit_form));
            (state.overlay.is_some(), vec![])
        }
        Event::OpenRolePicker => open_role_picker(state),
        Event::Timer => match state.debouncer.on_timer() {
            Some(fired) => {
                tracing::debug!(screen = ?fired, "debounce window elapsed");
                let result = on_list!(state, fired, |list, service| {
                    let plan = list.begin_reset();
                    dispatch(online, list, service, plan)
                });
                (true, settle(state, result))
            }
            None => (false, vec![]),
        },
        Event::PermissionsResult { granted } => on_permissions(state, *granted),
        Event::WebResponse { status, body, context } => on_web_response(state, *status, body, context),
        Event::Char(_) | Event::Backspace | Event::Confirm | Event::Cancel => (false, vec![]),
    };

    Ok((render || cleared, actions))
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::CloseFocus => "close_focus",
        Event::SwitchScreen => "switch_screen",
        Event::SearchMode => "search_mode",
        Event::FocusSearchBar => "focus_search_bar",
        Event::SubmitSearch => "submit_search",
        Event::ExitSearch => "exit_search",
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::CycleFilter => "cycle_filter",
        Event::Refresh => "refresh",
        Event::OpenStatusMenu => "open_status_menu",
        Event::Suspend => "suspend",
        Event::Delete => "delete",
        Event::Edit => "edit",
        Event::OpenRolePicker => "open_role_picker",
        Event::Confirm => "confirm",
        Event::Cancel => "cancel",
        Event::Timer => "timer",
        Event::PermissionsResult { .. } => "permissions_result",
        Event::WebResponse { .. } => "web_response",
    }
}

/// Identity of the selected record, detached from the list borrow.
struct Target {
    id: i64,
    title: String,
    status: &'static str,
}

fn describe<E: Entity>(entity: &E) -> Target {
    Target { id: entity.id(), title: entity.title().to_string(), status: entity.status().as_str() }
}

/// Phrases a fetch plan as a request, releasing the controller if that fails.
fn issue<E: Entity>(
    list: &mut ListController<E>,
    service: &EntityService<E>,
    plan: FetchPlan<E::Status>,
) -> Result<Action> {
    match routing::call_for(service, &plan.route, plan.ticket.page, plan.size) {
        Ok(call) => Ok(Action::Request(call.with_context(plan.context(service.resource())))),
        Err(err) => {
            list.abandon(plan.ticket);
            Err(err)
        }
    }
}

/// Issues a fetch plan only once web access is granted.
///
/// Without access the plan is released on the spot, so the controller stays idle
/// and the grant's own reload picks up the current query.
fn dispatch<E: Entity>(
    online: bool,
    list: &mut ListController<E>,
    service: &EntityService<E>,
    plan: FetchPlan<E::Status>,
) -> Option<Result<Action>> {
    if online {
        return Some(issue(list, service, plan));
    }
    tracing::debug!(resource = ?service.resource(), seq = plan.ticket.seq, "web access not granted, fetch held back");
    list.abandon(plan.ticket);
    None
}

fn apply_trigger<E: Entity>(
    online: bool,
    list: &mut ListController<E>,
    service: &EntityService<E>,
    debouncer: &mut Debouncer<Screen>,
    screen: Screen,
    trigger: Trigger<E::Status>,
) -> Option<Result<Action>> {
    match trigger {
        Trigger::Debounce => Some(Ok(Action::timeout(debouncer.arm(screen)))),
        Trigger::Fetch(plan) => {
            debouncer.cancel(screen);
            dispatch(online, list, service, plan)
        }
    }
}

/// Collects a fetch action, or turns its failure into a notification.
fn settle(state: &mut AppState, result: Option<Result<Action>>) -> Vec<Action> {
    match result {
        Some(Ok(action)) => vec![action],
        Some(Err(err)) => {
            state.notify_error(format!("Could not load records: {}", err.user_message()));
            vec![]
        }
        None => vec![],
    }
}

/// Bumps the screen's refresh trigger and arms its debounce window.
fn schedule_refresh(state: &mut AppState, screen: Screen) -> Vec<Action> {
    let online = state.permissions_granted;
    let result = on_list!(state, screen, |list, service| {
        let trigger = list.bump_refresh();
        apply_trigger(online, list, service, &mut state.debouncer, screen, trigger)
    });
    settle(state, result)
}

fn open_role_picker(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.screen != Screen::Users {
        return (false, vec![]);
    }
    let Some(user) = state.users.selected() else {
        return (false, vec![]);
    };
    state.overlay = Some(Overlay::RolePicker {
        user_id: user.id,
        title: format!("Grant role to {}", user.name),
        selected: 0,
    });
    let actions = if state.roles.is_empty() { request_roles(state) } else { vec![] };
    (true, actions)
}

fn request_roles(state: &mut AppState) -> Vec<Action> {
    match state.services.roles.list() {
        Ok(call) => vec![Action::Request(
            call.with_context(RequestContext::new(Resource::Roles, Purpose::RoleList)),
        )],
        Err(err) => {
            state.notify_error(format!("Could not load roles: {}", err.user_message()));
            vec![]
        }
    }
}

fn on_permissions(state: &mut AppState, granted: bool) -> (bool, Vec<Action>) {
    if !granted {
        state.notify_error("Web access was denied; the console cannot reach the backend");
        return (true, vec![]);
    }
    tracing::info!("web access granted, loading lists");
    state.permissions_granted = true;

    let users = {
        let plan = state.users.begin_reset();
        issue(&mut state.users, &state.services.users, plan)
    };
    let accounts = {
        let plan = state.accounts.begin_reset();
        issue(&mut state.accounts, &state.services.accounts, plan)
    };
    let mut actions = settle(state, Some(users));
    actions.extend(settle(state, Some(accounts)));
    actions.extend(request_roles(state));
    (true, actions)
}

fn handle_overlay_key(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let Some(overlay) = state.overlay.as_mut() else {
        return Ok((false, vec![]));
    };
    match event {
        Event::Cancel | Event::ExitSearch => {
            state.overlay = None;
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            overlay.move_down(&state.roles);
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            overlay.move_up();
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok((overlay.push_char(*c), vec![])),
        Event::Backspace => Ok((overlay.pop_char(), vec![])),
        Event::Confirm | Event::SubmitSearch => Ok(confirm_overlay(state)),
        _ => Ok((false, vec![])),
    }
}

fn confirm_overlay(state: &mut AppState) -> (bool, Vec<Action>) {
    let screen = state.screen;
    let Some(overlay) = state.overlay.take() else {
        return (false, vec![]);
    };

    match overlay {
        Overlay::StatusMenu { id, options, selected, .. } => {
            let Some(option) = options.get(selected) else {
                return (true, vec![]);
            };
            let pending = PendingMutation::Status { id, status: option.wire };
            if option.terminal {
                state.overlay = Some(Overlay::Confirm {
                    prompt: format!(
                        "Move {} #{id} to {}? This cannot be undone.",
                        screen.noun().to_lowercase(),
                        option.label
                    ),
                    pending,
                });
                (true, vec![])
            } else {
                (true, send_mutation(state, screen, &pending))
            }
        }
        Overlay::Confirm { pending, .. } => (true, send_mutation(state, screen, &pending)),
        Overlay::RolePicker { user_id, selected, .. } => {
            let Some(role) = state.roles.get(selected) else {
                return (true, vec![]);
            };
            let context = RequestContext::new(
                Resource::Users,
                Purpose::RoleAssign { user_id, role_id: role.id },
            );
            match state.services.roles.assign(user_id, role.id) {
                Ok(call) => (true, vec![Action::Request(call.with_context(context))]),
                Err(err) => {
                    state.notify_error(err.user_message());
                    (true, vec![])
                }
            }
        }
        Overlay::EditForm { id, fields, originals, field, buffer, title } => {
            let Some(spec) = fields.get(field) else {
                return (true, vec![]);
            };
            match spec.parse(&buffer) {
                Ok(value) => {
                    let mut patch = serde_json::Map::new();
                    patch.insert(spec.key.to_string(), value);
                    let call = on_list!(state, screen, |_list, service| service.update(id, patch));
                    (true, dispatch_mutation(state, screen, MutationKind::Update, id, call))
                }
                Err(message) => {
                    state.notify_error(message);
                    state.overlay = Some(Overlay::EditForm { id, fields, originals, field, buffer, title });
                    (true, vec![])
                }
            }
        }
    }
}

fn mutation_call<E: Entity>(
    service: &EntityService<E>,
    pending: &PendingMutation,
) -> Result<(MutationKind, HttpCall)> {
    match *pending {
        PendingMutation::Status { id, status } => {
            let target = E::Status::ALL
                .iter()
                .copied()
                .find(|s| s.as_str() == status)
                .ok_or_else(|| AdminError::Context(format!("unknown {} status {status}", E::KIND)))?;
            Ok((MutationKind::UpdateStatus, service.update_status(id, target)?))
        }
        PendingMutation::Suspend { id } => Ok((MutationKind::Suspend, service.suspend(id)?)),
        PendingMutation::Delete { id } => Ok((MutationKind::Delete, service.delete(id)?)),
    }
}

fn send_mutation(state: &mut AppState, screen: Screen, pending: &PendingMutation) -> Vec<Action> {
    let built = on_list!(state, screen, |_list, service| mutation_call(service, pending));
    match built {
        Ok((kind, call)) => dispatch_mutation(state, screen, kind, pending.id(), Ok(call)),
        Err(err) => {
            state.notify_error(err.user_message());
            vec![]
        }
    }
}

fn dispatch_mutation(
    state: &mut AppState,
    screen: Screen,
    kind: MutationKind,
    id: i64,
    call: Result<HttpCall>,
) -> Vec<Action> {
    match call {
        Ok(call) => {
            tracing::info!(resource = ?screen.resource(), ?kind, id, "mutation issued");
            let context = RequestContext::new(screen.resource(), Purpose::Mutation { kind, id });
            vec![Action::Request(call.with_context(context))]
        }
        Err(err) => {
            state.notify_error(err.user_message());
            vec![]
        }
    }
}

fn apply_page<E: Entity>(
    list: &mut ListController<E>,
    ticket: FetchTicket,
    shape: ResponseShape,
    status: u16,
    body: &[u8],
) -> Result<Applied> {
    let outcome = match shape {
        ResponseShape::Page => response::decode_page(status, body),
        ResponseShape::Single => response::decode_single(status, body).map(Page::single),
    };
    list.complete(ticket, outcome)
}

fn on_web_response(
    state: &mut AppState,
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> (bool, Vec<Action>) {
    let context = match RequestContext::from_map(context) {
        Ok(context) => context,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring web result without a usable context");
            return (false, vec![]);
        }
    };

    match context.purpose {
        Purpose::Fetch { .. } => {
            let (Some(screen), Some((ticket, shape))) =
                (Screen::for_resource(context.resource), FetchTicket::from_purpose(context.purpose))
            else {
                tracing::warn!(resource = ?context.resource, "fetch result for a resource without a list");
                return (false, vec![]);
            };
            let outcome = on_list!(state, screen, |list, _service| apply_page(list, ticket, shape, status, body));
            match outcome {
                Ok(applied) => {
                    tracing::debug!(
                        resource = ?context.resource,
                        mode = ?ticket.mode,
                        page = ticket.page,
                        added = applied.added,
                        "page applied"
                    );
                }
                Err(err) => {
                    tracing::warn!(resource = ?context.resource, page = ticket.page, error = %err, "fetch failed");
                    state.notify_error(format!("Could not load records: {}", err.user_message()));
                }
            }
            (true, vec![])
        }
        Purpose::Mutation { kind, id } => {
            let Some(screen) = Screen::for_resource(context.resource) else {
                return (false, vec![]);
            };
            match response::check(status, body) {
                Ok(()) => {
                    state.notify_info(format!("{} {id} {}", screen.noun(), kind.past_tense()));
                    (true, schedule_refresh(state, screen))
                }
                Err(err) => {
                    tracing::warn!(?kind, id, error = %err, "mutation failed");
                    state.notify_error(err.user_message());
                    (true, vec![])
                }
            }
        }
        Purpose::RoleList => {
            match response::decode_roles(status, body) {
                Ok(roles) => {
                    tracing::debug!(count = roles.len(), "role catalogue loaded");
                    state.roles = roles;
                }
                Err(err) => state.notify_error(format!("Could not load roles: {}", err.user_message())),
            }
            (true, vec![])
        }
        Purpose::RoleAssign { user_id, role_id } => match response::check(status, body) {
            Ok(()) => {
                let role = state
                    .roles
                    .iter()
                    .find(|r| r.id == role_id)
                    .map_or_else(|| format!("#{role_id}"), |r| r.name.clone());
                state.notify_info(format!("Role {role} granted to user {user_id}"));
                (true, schedule_refresh(state, Screen::Users))
            }
            Err(err) => {
                state.notify_error(err.user_message());
                (true, vec![])
            }
        },
    }
}
