//! Page of results as returned by the backend listing endpoints.

use serde::{Deserialize, Serialize};

/// One page of entities plus the backend's "no more pages" flag.
///
/// Missing fields are tolerated: an absent `content` is an empty page and an
/// absent `last` is treated as the final page, so a malformed listing can never
/// cause endless pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default = "default_last")]
    pub last: bool,
}

const fn default_last() -> bool {
    true
}

impl<T> Page<T> {
    /// Wraps the outcome of an exact lookup. Single results never paginate.
    #[must_use]
    pub fn single(found: Option<T>) -> Self {
        Self {
            content: found.into_iter().collect(),
            last: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_last_flag_means_final_page() {
        let page: Page<i64> = serde_json::from_str(r#"{"content":[1,2]}"#).unwrap();
        assert!(page.last);
        assert_eq!(page.content, vec![1, 2]);
    }

    #[test]
    fn extra_spring_fields_are_ignored() {
        let page: Page<i64> =
            serde_json::from_str(r#"{"content":[],"last":false,"number":0,"totalPages":4}"#).unwrap();
        assert!(!page.last);
    }

    #[test]
    fn single_lookup_is_always_last() {
        assert_eq!(Page::single(Some(5)), Page { content: vec![5], last: true });
        assert_eq!(Page::<i64>::single(None), Page { content: vec![], last: true });
    }
}
