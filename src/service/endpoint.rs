//! Backend URL construction.

use crate::domain::error::{AdminError, Result};
use url::Url;

/// Root of the backend REST API.
///
/// Path segments are percent-encoded individually, so user input such as an
/// e-mail address or a name with spaces can be placed in a URL safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Parses and validates a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Url`] if the string is not a URL and
    /// [`AdminError::Config`] if it is not an `http`/`https` URL.
    pub fn parse(base: &str) -> Result<Self> {
        let base = Url::parse(base.trim())?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(AdminError::Config(format!(
                "base_url must be an http(s) URL, got `{base}`"
            )));
        }
        Ok(Self { base })
    }

    /// Builds `{base}/{segments...}?{query...}`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Config`] if the base URL cannot take path segments.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<String> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| AdminError::Config(format!("`{}` cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_segments_to_a_base_with_path() {
        let endpoint = Endpoint::parse("http://localhost:8080/api/").unwrap();
        let url = endpoint.url(&["users", "42"], &[]).unwrap();
        assert_eq!(url, "http://localhost:8080/api/users/42");
    }

    #[test]
    fn encodes_user_input() {
        let endpoint = Endpoint::parse("https://admin.example.com").unwrap();
        let url = endpoint
            .url(&["users", "search"], &[("name", "maría josé".to_string())])
            .unwrap();
        assert_eq!(url, "https://admin.example.com/users/search?name=mar%C3%ADa+jos%C3%A9");
    }

    #[test]
    fn rejects_non_http_bases() {
        assert!(matches!(Endpoint::parse("mailto:ops@example.com"), Err(AdminError::Config(_))));
        assert!(matches!(Endpoint::parse("not a url"), Err(AdminError::Url(_))));
    }
}
