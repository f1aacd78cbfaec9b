//! End-to-end flows through the public event API: key events, timer
//! expirations and web results are fed to `handle_event` and the emitted
//! requests are answered by hand.

use serde_json::json;
use std::time::Duration;
use zadmin::app::StatusFilter;
use zadmin::domain::{AccountStatus, UserStatus};
use zadmin::service::{Method, ServiceRequest};
use zadmin::{handle_event, Action, AppState, Config, Event, Screen, Services, Theme};

const BASE: &str = "http://backend/api";

fn state() -> AppState {
    let config = Config { base_url: BASE.to_string(), ..Config::default() };
    AppState::new(Services::new(&config.endpoint()), Theme::default(), 10, Duration::from_millis(500))
}

/// A state with web access granted; the initial loads are left unanswered.
fn online() -> AppState {
    let mut state = state();
    send(&mut state, Event::PermissionsResult { granted: true });
    state
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).expect("handler never fails on these events").1
}

fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
    text.chars().flat_map(|c| send(state, Event::Char(c))).collect()
}

/// Fires one timer per outstanding `SetTimeout` and collects what they issue.
fn elapse(state: &mut AppState, scheduled: &[Action]) -> Vec<Action> {
    let timers = scheduled
        .iter()
        .filter(|a| matches!(a, Action::SetTimeout { .. }))
        .count();
    (0..timers).flat_map(|_| send(state, Event::Timer)).collect()
}

fn requests(actions: &[Action]) -> Vec<ServiceRequest> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Request(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

fn urls(actions: &[Action]) -> Vec<String> {
    requests(actions).into_iter().map(|r| r.call.url).collect()
}

fn respond(state: &mut AppState, request: &ServiceRequest, status: u16, body: &serde_json::Value) -> Vec<Action> {
    let body = if body.is_null() { vec![] } else { body.to_string().into_bytes() };
    send(
        state,
        Event::WebResponse {
            status,
            body,
            context: request.context.to_map().expect("context encodes"),
        },
    )
}

fn user(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("user{id}@corp.cl"),
        "nationalId": format!("{:08}-{}", id, id % 10),
        "status": "ACTIVE",
    })
}

fn user_page(ids: std::ops::Range<i64>, last: bool) -> serde_json::Value {
    let content: Vec<_> = ids.map(|id| user(id, &format!("user {id}"))).collect();
    json!({ "content": content, "last": last })
}

/// Grants web access and answers the initial users listing with `page`.
fn loaded(page: &serde_json::Value) -> AppState {
    let mut state = state();
    let actions = send(&mut state, Event::PermissionsResult { granted: true });
    let initial = requests(&actions);
    respond(&mut state, &initial[0], 200, page);
    state
}

#[test]
fn rapid_edits_issue_one_fetch_with_final_query() {
    let mut state = online();
    send(&mut state, Event::SearchMode);

    let mut scheduled = type_text(&mut state, "mari");
    scheduled.extend(send(&mut state, Event::Backspace));
    scheduled.extend(type_text(&mut state, "ia"));
    scheduled.extend(send(&mut state, Event::CycleFilter));
    assert!(requests(&scheduled).is_empty());

    let issued = elapse(&mut state, &scheduled);
    assert_eq!(
        urls(&issued),
        vec![format!("{BASE}/users/search?name=maria&page=0&size=10")]
    );
    assert_eq!(state.users.filter(), StatusFilter::Only(UserStatus::Active));
}

#[test]
fn email_query_uses_exact_lookup() {
    let mut state = online();
    send(&mut state, Event::SearchMode);
    let scheduled = type_text(&mut state, "a@b.com");

    let issued = elapse(&mut state, &scheduled);
    assert_eq!(urls(&issued), vec![format!("{BASE}/users/email/a@b.com")]);
}

#[test]
fn national_id_query_uses_exact_lookup() {
    let mut state = online();
    send(&mut state, Event::SearchMode);
    type_text(&mut state, "12345678-9");

    let issued = send(&mut state, Event::SubmitSearch);
    assert_eq!(urls(&issued), vec![format!("{BASE}/users/national-id/12345678-9")]);
}

#[test]
fn leaving_search_reloads_unfiltered_list_at_once() {
    let mut state = online();
    send(&mut state, Event::SearchMode);
    let scheduled = type_text(&mut state, "ab");
    assert_eq!(scheduled.len(), 2);

    let issued = send(&mut state, Event::ExitSearch);
    assert_eq!(urls(&issued), vec![format!("{BASE}/users?page=0&size=10")]);
    assert!(state.users.query().is_empty());

    let late = elapse(&mut state, &scheduled);
    assert!(requests(&late).is_empty(), "pending window was cancelled");
}

#[test]
fn nothing_is_fetched_before_web_access() {
    let mut state = state();
    send(&mut state, Event::SearchMode);
    let scheduled = type_text(&mut state, "a");
    assert!(requests(&elapse(&mut state, &scheduled)).is_empty());
    assert!(requests(&send(&mut state, Event::SwitchScreen)).is_empty());
    assert!(!state.users.is_in_flight());
    assert!(!state.accounts.is_in_flight());

    let granted = send(&mut state, Event::PermissionsResult { granted: true });
    assert_eq!(
        urls(&granted),
        vec![
            format!("{BASE}/users/search?name=a&page=0&size=10"),
            format!("{BASE}/accounts?page=0&size=10"),
            format!("{BASE}/roles"),
        ]
    );
}

#[test]
fn empty_query_with_status_filter_searches_by_status() {
    let mut state = online();
    let scheduled = send(&mut state, Event::CycleFilter);
    let issued = elapse(&mut state, &scheduled);
    assert_eq!(urls(&issued), vec![format!("{BASE}/users/status/ACTIVE?page=0&size=10")]);
}

#[test]
fn filter_cycles_back_to_unfiltered_listing() {
    let mut state = online();
    let mut scheduled = vec![];
    for _ in 0..4 {
        scheduled.extend(send(&mut state, Event::CycleFilter));
    }
    assert_eq!(state.users.filter(), StatusFilter::All);

    let issued = elapse(&mut state, &scheduled);
    assert_eq!(urls(&issued), vec![format!("{BASE}/users?page=0&size=10")]);
}

#[test]
fn scrolling_appends_next_page_without_duplicates() {
    let mut state = loaded(&user_page(1..11, false));
    assert_eq!(state.users.items().len(), 10);

    let mut issued = vec![];
    for _ in 0..9 {
        issued.extend(send(&mut state, Event::KeyDown));
    }
    let appends = requests(&issued);
    assert_eq!(appends.len(), 1, "one append while the first is in flight");
    assert_eq!(appends[0].call.url, format!("{BASE}/users?page=1&size=10"));

    respond(&mut state, &appends[0], 200, &user_page(10..20, true));

    let ids: Vec<i64> = state.users.items().iter().map(|u| u.id).collect();
    assert_eq!(ids, (1..20).collect::<Vec<_>>());
    assert!(state.users.is_last());

    let more: Vec<Action> = (0..20).flat_map(|_| send(&mut state, Event::KeyDown)).collect();
    assert!(requests(&more).is_empty(), "no fetch past the last page");
}

#[test]
fn name_search_then_scroll_end_to_end() {
    let mut state = state();
    send(&mut state, Event::PermissionsResult { granted: true });
    send(&mut state, Event::SearchMode);
    let scheduled = type_text(&mut state, "maria");

    let issued = elapse(&mut state, &scheduled);
    let search = requests(&issued);
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].call.url, format!("{BASE}/users/search?name=maria&page=0&size=10"));

    let first: Vec<_> = (1..11).map(|id| user(id, &format!("Maria {id}"))).collect();
    respond(&mut state, &search[0], 200, &json!({ "content": first, "last": false }));

    let scroll: Vec<Action> = (0..9).flat_map(|_| send(&mut state, Event::KeyDown)).collect();
    let append = requests(&scroll);
    assert_eq!(append.len(), 1);
    assert_eq!(append[0].call.url, format!("{BASE}/users/search?name=maria&page=1&size=10"));

    let second: Vec<_> = (9..15).map(|id| user(id, &format!("Maria {id}"))).collect();
    respond(&mut state, &append[0], 200, &json!({ "content": second, "last": true }));

    let ids: Vec<i64> = state.users.items().iter().map(|u| u.id).collect();
    assert_eq!(ids, (1..15).collect::<Vec<_>>());
    assert_eq!(state.users.next_page(), 2);
}

#[test]
fn failed_reset_keeps_list_and_cursor() {
    let mut state = loaded(&user_page(1..6, true));
    send(&mut state, Event::KeyDown);
    send(&mut state, Event::KeyDown);
    assert_eq!(state.users.selected_index(), 2);
    assert_eq!(state.users.next_page(), 1);

    let scheduled = send(&mut state, Event::Refresh);
    let issued = elapse(&mut state, &scheduled);
    let reload = requests(&issued);
    assert!(state.users.is_in_flight());

    respond(&mut state, &reload[0], 500, &json!({ "error": "database unavailable" }));

    assert_eq!(state.users.items().len(), 5);
    assert_eq!(state.users.selected_index(), 2);
    assert_eq!(state.users.next_page(), 1);
    assert!(state.users.is_last());
    assert!(!state.users.is_in_flight());
    let text = state.notification.as_ref().map(|n| n.text.clone()).unwrap_or_default();
    assert!(text.contains("database unavailable"), "{text}");
}

#[test]
fn closed_account_offers_no_status_change() {
    let mut state = state();
    let actions = send(&mut state, Event::PermissionsResult { granted: true });
    let accounts = requests(&actions)
        .into_iter()
        .find(|r| r.call.url.contains("/accounts"))
        .expect("accounts listing issued");
    let page = json!({
        "content": [{
            "id": 7,
            "number": "ACC-0007",
            "holderName": "Carla Rojas",
            "holderEmail": "carla@corp.cl",
            "holderNationalId": "33333333-3",
            "creditLimit": 500_000,
            "status": "CLOSED",
        }],
        "last": true,
    });
    respond(&mut state, &accounts, 200, &page);

    send(&mut state, Event::SwitchScreen);
    assert_eq!(state.screen, Screen::Accounts);
    assert_eq!(state.accounts.items()[0].status, AccountStatus::Closed);

    send(&mut state, Event::OpenStatusMenu);
    let vm = state.compute_viewmodel(30, 100);
    let overlay = vm.overlay.expect("status menu open");
    assert_eq!(overlay.selected, None);

    let confirmed = send(&mut state, Event::Confirm);
    assert!(requests(&confirmed).is_empty());
}

#[test]
fn status_change_refreshes_after_success() {
    let mut state = loaded(&user_page(1..3, true));

    send(&mut state, Event::OpenStatusMenu);
    let issued = send(&mut state, Event::Confirm);
    let update = requests(&issued);
    assert_eq!(update.len(), 1);
    assert_eq!(update[0].call.method, Method::Put);
    assert_eq!(update[0].call.url, format!("{BASE}/users/1/status"));

    let follow_up = respond(&mut state, &update[0], 200, &user(1, "user 1"));
    assert_eq!(follow_up, vec![Action::SetTimeout { seconds: 0.5 }]);
    assert_eq!(state.users.refresh_trigger(), 1);

    let reload = elapse(&mut state, &follow_up);
    assert_eq!(urls(&reload), vec![format!("{BASE}/users?page=0&size=10")]);
}

#[test]
fn unknown_email_yields_empty_last_page() {
    let mut state = loaded(&user_page(1..4, true));
    send(&mut state, Event::SearchMode);
    type_text(&mut state, "ghost@corp.cl");
    let issued = send(&mut state, Event::SubmitSearch);
    let lookup = requests(&issued);

    respond(&mut state, &lookup[0], 404, &serde_json::Value::Null);

    assert!(state.users.items().is_empty());
    assert!(state.users.is_last());
    assert!(state.notification.is_none());
}
