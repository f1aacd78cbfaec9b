//! Debounced search-and-filter list controller.
//!
//! [`ListController`] owns one screen's accumulated results together with the query
//! text, status filter, page cursor and in-flight flag. It never performs I/O:
//! input operations report whether a fetch should be debounced or issued now, and
//! fetch operations hand back a [`FetchPlan`] that the handler phrases as a backend
//! request. When the response arrives the handler calls [`ListController::complete`].
//!
//! # Lifecycle
//!
//! 1. Query, filter and refresh-trigger changes return [`Trigger::Debounce`];
//!    clearing the query returns [`Trigger::Fetch`] for an immediate reload.
//! 2. When the debounce window elapses (or on manual submit) the handler calls
//!    [`ListController::begin_reset`], which routes the current query state.
//! 3. [`ListController::near_end`] issues forward pagination with the route of the
//!    last successful reset, unless a fetch is in flight or the last page is loaded.
//! 4. [`ListController::complete`] always clears the in-flight flag. On success a
//!    reset replaces the list and an append extends it; on failure nothing changes.
//!
//! Requests are not tagged for cancellation: responses apply in arrival order.

use super::modes::StatusFilter;
use super::routing::{self, QueryRoute};
use crate::domain::error::Result;
use crate::domain::{Entity, Page};
use crate::service::{FetchMode, Purpose, RequestContext, Resource, ResponseShape};
use std::collections::HashSet;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Selecting a row this close to the end of the list signals "near end".
pub const NEAR_END_ROWS: usize = 2;

/// A fetch the controller wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan<S> {
    pub route: QueryRoute<S>,
    pub ticket: FetchTicket,
    pub size: u32,
}

impl<S> FetchPlan<S> {
    /// Context to round-trip with the request.
    #[must_use]
    pub const fn context(&self, resource: Resource) -> RequestContext {
        RequestContext::new(
            resource,
            Purpose::Fetch {
                mode: self.ticket.mode,
                shape: self.route.shape(),
                page: self.ticket.page,
                seq: self.ticket.seq,
            },
        )
    }
}

/// Identity of an outstanding fetch, recovered from the response context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub mode: FetchMode,
    pub page: u32,
    pub seq: u64,
}

impl FetchTicket {
    /// Recovers a ticket from a fetch purpose. Other purposes yield `None`.
    #[must_use]
    pub const fn from_purpose(purpose: Purpose) -> Option<(Self, ResponseShape)> {
        match purpose {
            Purpose::Fetch { mode, shape, page, seq } => Some((Self { mode, page, seq }, shape)),
            _ => None,
        }
    }
}

/// What an input change asks of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger<S> {
    /// (Re)start the debounce window; fetch when it elapses.
    Debounce,
    /// Issue this fetch now, bypassing the debounce.
    Fetch(FetchPlan<S>),
}

/// Outcome of applying a successful page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Entities added to the list (for a reset, the new list length).
    pub added: usize,
    /// Whether the page belonged to an older reset than the newest issued one.
    pub stale: bool,
}

/// Search, filter and pagination state for one entity list.
#[derive(Debug, Clone)]
pub struct ListController<E: Entity> {
    items: Vec<E>,
    query: String,
    filter: StatusFilter<E::Status>,
    refresh_trigger: u64,
    page_size: u32,
    next_page: u32,
    last: bool,
    in_flight: bool,
    /// Route of the last successful reset; governs pagination.
    route: Option<QueryRoute<E::Status>>,
    /// Routes of reset fetches still awaiting a response, by issue sequence.
    pending_resets: Vec<(u64, QueryRoute<E::Status>)>,
    issued: u64,
    selected: usize,
    loaded: bool,
}

impl<E: Entity> ListController<E> {
    /// Creates an empty, unloaded controller.
    ///
    /// # Parameters
    ///
    /// * `page_size` - Records requested per page; clamped to at least 1
    ///
    /// # Returns
    ///
    /// A controller with no query, no filter and no fetch in flight. It reports
    /// itself as on the last page until a first page says otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use zadmin::app::{ListController, Trigger};
    /// use zadmin::domain::User;
    ///
    /// let mut list: ListController<User> = ListController::new(0);
    /// assert_eq!(list.page_size(), 1);
    /// assert!(list.is_last());
    /// assert_eq!(list.push_char('m'), Trigger::Debounce);
    /// ```
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            filter: StatusFilter::All,
            refresh_trigger: 0,
            page_size: page_size.max(1),
            next_page: 0,
            last: true,
            in_flight: false,
            route: None,
            pending_resets: Vec::new(),
            issued: 0,
            selected: 0,
            loaded: false,
        }
    }

    /// Accumulated results across the loaded pages, in arrival order.
    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Query text as typed, untrimmed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn filter(&self) -> StatusFilter<E::Status> {
        self.filter
    }

    #[must_use]
    pub const fn refresh_trigger(&self) -> u64 {
        self.refresh_trigger
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page the next forward fetch will request.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Whether the backend reported the last page for the current route.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.last
    }

    /// Whether a fetch is awaiting its response. Blocks pagination, not resets.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether any fetch has succeeded yet.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn route(&self) -> Option<&QueryRoute<E::Status>> {
        self.route.as_ref()
    }

    /// Zero-based row of the selection within [`items`](Self::items).
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&E> {
        self.items.get(self.selected)
    }

    /// Replaces the query text.
    ///
    /// A query that becomes blank reloads immediately; any other edit debounces.
    pub fn set_query(&mut self, text: impl Into<String>) -> Trigger<E::Status> {
        let was_blank = self.query.trim().is_empty();
        self.query = text.into();
        if self.query.trim().is_empty() && !was_blank {
            Trigger::Fetch(self.begin_reset())
        } else {
            Trigger::Debounce
        }
    }

    /// Appends a character to the query. See [`set_query`](Self::set_query).
    pub fn push_char(&mut self, c: char) -> Trigger<E::Status> {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query)
    }

    /// Removes the last query character. Returns `None` if the query was already empty.
    pub fn pop_char(&mut self) -> Option<Trigger<E::Status>> {
        let mut query = self.query.clone();
        query.pop()?;
        Some(self.set_query(query))
    }

    /// Empties the query and reloads immediately.
    pub fn clear_query(&mut self) -> FetchPlan<E::Status> {
        self.query.clear();
        self.begin_reset()
    }

    /// Replaces the status filter. Always debounced.
    pub fn set_filter(&mut self, filter: StatusFilter<E::Status>) -> Trigger<E::Status> {
        self.filter = filter;
        Trigger::Debounce
    }

    /// Advances the filter to the next status in the cycle.
    pub fn cycle_filter(&mut self) -> Trigger<E::Status> {
        self.set_filter(self.filter.next())
    }

    /// Forces a reload without touching query or filter.
    pub fn bump_refresh(&mut self) -> Trigger<E::Status> {
        self.refresh_trigger = self.refresh_trigger.wrapping_add(1);
        Trigger::Debounce
    }

    /// Routes the current query state into a page-0 reset fetch.
    ///
    /// Used when the debounce window elapses, on manual submit and on clear. A reset
    /// is issued even while another fetch is in flight.
    pub fn begin_reset(&mut self) -> FetchPlan<E::Status> {
        let route = routing::route(&self.query, self.filter);
        self.issued += 1;
        self.in_flight = true;
        self.pending_resets.push((self.issued, route.clone()));
        tracing::debug!(route = route.kind(), seq = self.issued, "reset fetch issued");
        FetchPlan {
            route,
            ticket: FetchTicket { mode: FetchMode::Reset, page: 0, seq: self.issued },
            size: self.page_size,
        }
    }

    /// Forward pagination signal from the view.
    ///
    /// Returns `None` (the signal is dropped, not queued) while a fetch is in
    /// flight, once the last page is loaded, or when the current route is a
    /// single-result lookup.
    pub fn near_end(&mut self) -> Option<FetchPlan<E::Status>> {
        if self.in_flight || self.last {
            return None;
        }
        let route = self.route.clone().filter(QueryRoute::paginates)?;
        self.in_flight = true;
        tracing::debug!(route = route.kind(), page = self.next_page, "append fetch issued");
        Some(FetchPlan {
            route,
            ticket: FetchTicket { mode: FetchMode::Append, page: self.next_page, seq: self.issued },
            size: self.page_size,
        })
    }

    /// Applies a fetch outcome.
    ///
    /// The in-flight flag is cleared whatever the outcome. A failure leaves the list,
    /// cursor and last-page flag untouched and is handed back to the caller.
    ///
    /// Responses apply in arrival order. An append issued before a newer reset still
    /// lands on the reset's list and moves the cursor past its own page; the result
    /// is flagged [`Applied::stale`].
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged.
    pub fn complete(&mut self, ticket: FetchTicket, outcome: Result<Page<E>>) -> Result<Applied> {
        self.in_flight = false;
        let reset_route = match ticket.mode {
            FetchMode::Reset => self.take_pending(ticket.seq),
            FetchMode::Append => None,
        };
        let page = outcome?;
        let stale = ticket.seq < self.issued;
        if stale {
            tracing::warn!(seq = ticket.seq, newest = self.issued, "applying response from an older query");
        }
        self.loaded = true;
        self.last = page.last;

        let added = match ticket.mode {
            FetchMode::Reset => {
                if let Some(route) = reset_route {
                    self.route = Some(route);
                }
                self.items = page.content;
                self.next_page = 1;
                self.selected = 0;
                self.items.len()
            }
            FetchMode::Append => {
                let known: HashSet<i64> = self.items.iter().map(Entity::id).collect();
                let before = self.items.len();
                self.items.extend(page.content.into_iter().filter(|e| !known.contains(&e.id())));
                self.next_page = ticket.page + 1;
                self.items.len() - before
            }
        };
        Ok(Applied { added, stale })
    }

    /// Releases a fetch that could not be sent. The list is left as it was.
    pub fn abandon(&mut self, ticket: FetchTicket) {
        self.in_flight = false;
        if ticket.mode == FetchMode::Reset {
            self.take_pending(ticket.seq);
        }
    }

    fn take_pending(&mut self, seq: u64) -> Option<QueryRoute<E::Status>> {
        let index = self.pending_resets.iter().position(|(s, _)| *s == seq)?;
        Some(self.pending_resets.remove(index).1)
    }

    /// Moves the selection down, clamping at the end.
    ///
    /// Returns whether the selection is now within [`NEAR_END_ROWS`] of the end.
    pub fn move_down(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
        self.selected + NEAR_END_ROWS >= self.items.len()
    }

    /// Moves the selection up, stopping at the first row.
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AdminError;
    use crate::domain::{User, UserStatus};

    fn user(id: i64) -> User {
        User {
            id,
            name: format!("user {id}"),
            email: format!("u{id}@corp.cl"),
            national_id: "12345678-9".into(),
            phone: None,
            status: UserStatus::Active,
            roles: vec![],
            created_at: None,
        }
    }

    fn page(ids: std::ops::Range<i64>, last: bool) -> Page<User> {
        Page { content: ids.map(user).collect(), last }
    }

    fn loaded(ids: std::ops::Range<i64>, last: bool) -> ListController<User> {
        let mut list = ListController::new(DEFAULT_PAGE_SIZE);
        let plan = list.begin_reset();
        list.complete(plan.ticket, Ok(page(ids, last))).unwrap();
        list
    }

    #[test]
    fn reset_replaces_and_sets_cursor_to_one() {
        let list = loaded(0..10, false);
        assert_eq!(list.items().len(), 10);
        assert_eq!(list.next_page(), 1);
        assert!(!list.is_in_flight());
        assert_eq!(list.route(), Some(&QueryRoute::Listing));
    }

    #[test]
    fn append_skips_known_ids_and_advances() {
        let mut list = loaded(0..10, false);
        let plan = list.near_end().unwrap();
        assert_eq!(plan.ticket.page, 1);
        assert_eq!(plan.ticket.mode, FetchMode::Append);
        let applied = list.complete(plan.ticket, Ok(page(8..15, true))).unwrap();
        assert_eq!(applied.added, 5);
        assert_eq!(list.items().len(), 15);
        assert_eq!(list.next_page(), 2);
        assert!(list.is_last());
    }

    #[test]
    fn near_end_is_dropped_while_in_flight() {
        let mut list = loaded(0..10, false);
        assert!(list.near_end().is_some());
        assert!(list.near_end().is_none());
    }

    #[test]
    fn near_end_is_dropped_on_last_page() {
        let mut list = loaded(0..3, true);
        assert!(list.near_end().is_none());
    }

    #[test]
    fn exact_lookup_never_paginates() {
        let mut list = ListController::<User>::new(DEFAULT_PAGE_SIZE);
        assert_eq!(list.set_query("a@b.com"), Trigger::Debounce);
        let plan = list.begin_reset();
        assert!(matches!(plan.route, QueryRoute::ExactEmail(_)));
        list.complete(plan.ticket, Ok(Page { content: vec![user(1)], last: false })).unwrap();
        assert!(list.near_end().is_none());
    }

    #[test]
    fn failure_keeps_list_and_cursor_and_releases_flag() {
        let mut list = loaded(0..10, false);
        let plan = list.near_end().unwrap();
        let err = list
            .complete(plan.ticket, Err(AdminError::Service { status: 500, message: "boom".into() }))
            .unwrap_err();
        assert_eq!(err.user_message(), "boom");
        assert_eq!(list.items().len(), 10);
        assert_eq!(list.next_page(), 1);
        assert!(!list.is_in_flight());
        assert!(list.near_end().is_some());
    }

    #[test]
    fn failed_reset_keeps_previous_route() {
        let mut list = loaded(0..10, false);
        list.set_query("maria");
        let plan = list.begin_reset();
        assert!(list.complete(plan.ticket, Err(AdminError::Context("x".into()))).is_err());
        assert_eq!(list.route(), Some(&QueryRoute::Listing));
        assert_eq!(list.items().len(), 10);
    }

    #[test]
    fn clearing_the_query_reloads_immediately() {
        let mut list = ListController::<User>::new(DEFAULT_PAGE_SIZE);
        list.set_query("jo");
        assert_eq!(list.pop_char(), Some(Trigger::Debounce));
        match list.pop_char() {
            Some(Trigger::Fetch(plan)) => assert_eq!(plan.route, QueryRoute::Listing),
            other => panic!("expected immediate fetch, got {other:?}"),
        }
        assert_eq!(list.pop_char(), None);
    }

    #[test]
    fn stale_reset_still_applies_but_is_flagged() {
        let mut list = ListController::<User>::new(DEFAULT_PAGE_SIZE);
        let slow = list.begin_reset();
        list.set_query("maria");
        let fast = list.begin_reset();
        list.complete(fast.ticket, Ok(page(0..2, true))).unwrap();
        let applied = list.complete(slow.ticket, Ok(page(10..20, false))).unwrap();
        assert!(applied.stale);
        assert_eq!(list.items()[0].id, 10);
        assert_eq!(list.route(), Some(&QueryRoute::Listing));
    }

    #[test]
    fn stale_append_lands_on_newer_list() {
        let mut list = loaded(0..10, false);
        let append = list.near_end().unwrap();
        assert_eq!(list.set_query("maria"), Trigger::Debounce);
        let reset = list.begin_reset();

        list.complete(reset.ticket, Ok(page(100..110, false))).unwrap();
        assert_eq!(list.next_page(), 1);

        let applied = list.complete(append.ticket, Ok(page(10..20, false))).unwrap();
        assert!(applied.stale);
        assert_eq!(list.items().len(), 20);
        assert_eq!(list.next_page(), 2);
        assert_eq!(list.route(), Some(&QueryRoute::NameContains("maria".into())));
    }

    #[test]
    fn selection_reports_near_end() {
        let mut list = loaded(0..5, false);
        assert!(!list.move_down());
        assert!(!list.move_down());
        assert!(list.move_down());
        list.move_down();
        assert!(list.move_down());
        assert_eq!(list.selected_index(), 4);
        list.move_up();
        assert_eq!(list.selected().map(|u| u.id), Some(3));
    }

    #[test]
    fn refresh_bump_debounces() {
        let mut list = ListController::<User>::new(DEFAULT_PAGE_SIZE);
        assert_eq!(list.bump_refresh(), Trigger::Debounce);
        assert_eq!(list.refresh_trigger(), 1);
    }
}
