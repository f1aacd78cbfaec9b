//! Query routing by input shape.
//!
//! The raw search box is interpreted by an ordered table of rules, each a
//! predicate paired with the fetch strategy it selects. Rules are evaluated top to
//! bottom on the trimmed query and the first match wins, so precedence is explicit
//! in the table itself:
//!
//! | # | predicate                      | route             | paginates |
//! |---|--------------------------------|-------------------|-----------|
//! | 1 | non-empty, contains `@`        | exact e-mail      | no        |
//! | 2 | `8 digits - 1 digit`           | exact national ID | no        |
//! | 3 | non-empty                      | name contains     | yes       |
//! | 4 | status filter is not `All`     | by status         | yes       |
//! | 5 | (always)                       | full listing      | yes       |

use super::modes::StatusFilter;
use crate::domain::error::Result;
use crate::domain::{Entity, StatusKind};
use crate::service::{EntityService, HttpCall, ResponseShape};
use regex::Regex;
use std::sync::LazyLock;

static NATIONAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}-[0-9]$").expect("national id pattern is valid"));

/// Fetch strategy selected for the current query state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRoute<S> {
    ExactEmail(String),
    ExactNationalId(String),
    NameContains(String),
    ByStatus(S),
    Listing,
}

impl<S> QueryRoute<S> {
    /// Single-result lookups never paginate.
    #[must_use]
    pub const fn paginates(&self) -> bool {
        !matches!(self, Self::ExactEmail(_) | Self::ExactNationalId(_))
    }

    #[must_use]
    pub const fn shape(&self) -> ResponseShape {
        if self.paginates() {
            ResponseShape::Page
        } else {
            ResponseShape::Single
        }
    }

    /// Short name for traces.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ExactEmail(_) => "exact_email",
            Self::ExactNationalId(_) => "exact_national_id",
            Self::NameContains(_) => "name_contains",
            Self::ByStatus(_) => "by_status",
            Self::Listing => "listing",
        }
    }

    /// Text to highlight in result names, for name searches only.
    #[must_use]
    pub fn highlight_text(&self) -> Option<&str> {
        match self {
            Self::NameContains(text) => Some(text),
            _ => None,
        }
    }
}

struct Rule<S> {
    applies: fn(&str, StatusFilter<S>) -> bool,
    build: fn(&str, StatusFilter<S>) -> QueryRoute<S>,
}

fn rules<S: StatusKind>() -> [Rule<S>; 5] {
    [
        Rule {
            applies: |q, _| !q.is_empty() && q.contains('@'),
            build: |q, _| QueryRoute::ExactEmail(q.to_string()),
        },
        Rule {
            applies: |q, _| NATIONAL_ID.is_match(q),
            build: |q, _| QueryRoute::ExactNationalId(q.to_string()),
        },
        Rule {
            applies: |q, _| !q.is_empty(),
            build: |q, _| QueryRoute::NameContains(q.to_string()),
        },
        Rule {
            applies: |_, f| matches!(f, StatusFilter::Only(_)),
            build: |_, f| match f {
                StatusFilter::Only(status) => QueryRoute::ByStatus(status),
                StatusFilter::All => QueryRoute::Listing,
            },
        },
        Rule {
            applies: |_, _| true,
            build: |_, _| QueryRoute::Listing,
        },
    ]
}

/// Selects the fetch strategy for a raw query and filter.
#[must_use]
pub fn route<S: StatusKind>(query: &str, filter: StatusFilter<S>) -> QueryRoute<S> {
    let query = query.trim();
    rules()
        .into_iter()
        .find(|rule| (rule.applies)(query, filter))
        .map_or(QueryRoute::Listing, |rule| (rule.build)(query, filter))
}

/// Phrases a route as a backend call at the given page.
///
/// # Errors
///
/// Propagates URL construction failures from the service wrapper.
pub fn call_for<E: Entity>(
    service: &EntityService<E>,
    route: &QueryRoute<E::Status>,
    page: u32,
    size: u32,
) -> Result<HttpCall> {
    match route {
        QueryRoute::ExactEmail(email) => service.find_by_exact_email(email),
        QueryRoute::ExactNationalId(id) => service.find_by_exact_national_id(id),
        QueryRoute::NameContains(text) => service.find_by_name_contains(text, page, size),
        QueryRoute::ByStatus(status) => service.find_by_status(*status, page, size),
        QueryRoute::Listing => service.list_by_page(page, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserStatus;

    const ALL: StatusFilter<UserStatus> = StatusFilter::All;

    #[test]
    fn email_wins_over_everything() {
        assert_eq!(
            route("a@b.com", StatusFilter::Only(UserStatus::Active)),
            QueryRoute::ExactEmail("a@b.com".into())
        );
    }

    #[test]
    fn national_id_shape_selects_exact_lookup() {
        assert_eq!(route("12345678-9", ALL), QueryRoute::ExactNationalId("12345678-9".into()));
    }

    #[test]
    fn near_misses_of_the_id_shape_are_name_searches() {
        assert_eq!(route("1234567-9", ALL), QueryRoute::NameContains("1234567-9".into()));
        assert_eq!(route("12345678-K", ALL), QueryRoute::NameContains("12345678-K".into()));
        assert_eq!(route("123456789-0", ALL), QueryRoute::NameContains("123456789-0".into()));
    }

    #[test]
    fn free_text_is_trimmed_name_search() {
        let route = route("  john ", ALL);
        assert_eq!(route, QueryRoute::NameContains("john".into()));
        assert!(route.paginates());
    }

    #[test]
    fn name_search_ignores_status_filter() {
        assert_eq!(
            route("john", StatusFilter::Only(UserStatus::Suspended)),
            QueryRoute::NameContains("john".into())
        );
    }

    #[test]
    fn empty_query_with_filter_searches_by_status() {
        assert_eq!(
            route("", StatusFilter::Only(UserStatus::Active)),
            QueryRoute::ByStatus(UserStatus::Active)
        );
    }

    #[test]
    fn blank_query_without_filter_lists_everything() {
        assert_eq!(route("   ", ALL), QueryRoute::Listing);
    }

    #[test]
    fn exact_lookups_do_not_paginate() {
        assert!(!QueryRoute::<UserStatus>::ExactEmail("x@y".into()).paginates());
        assert_eq!(QueryRoute::<UserStatus>::ExactNationalId("12345678-9".into()).shape(), ResponseShape::Single);
    }
}
