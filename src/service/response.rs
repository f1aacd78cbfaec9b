//! Response decoding for backend calls.
//!
//! The error taxonomy is flat: 2xx succeeds, anything else is a
//! [`AdminError::Service`] carrying whatever message the payload offered.

use crate::domain::error::{AdminError, Result};
use crate::domain::{Page, Role};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const NOT_FOUND: u16 = 404;

/// Fails with a service error unless `status` is 2xx.
///
/// # Errors
///
/// Returns [`AdminError::Service`] for non-success statuses.
pub fn check(status: u16, body: &[u8]) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(AdminError::Service { status, message: error_message(body) })
    }
}

/// Decodes a listing page.
///
/// # Errors
///
/// Service errors for non-2xx statuses, decode errors for malformed bodies.
pub fn decode_page<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Page<T>> {
    check(status, body)?;
    Ok(serde_json::from_slice(body)?)
}

/// Decodes an exact lookup. A 404 or an empty 2xx body means "not found".
///
/// # Errors
///
/// Service errors for other non-2xx statuses, decode errors for malformed bodies.
pub fn decode_single<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Option<T>> {
    if status == NOT_FOUND {
        return Ok(None);
    }
    check(status, body)?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decodes the role catalogue, accepting either a bare array or a page.
///
/// # Errors
///
/// Service errors for non-2xx statuses, decode errors for malformed bodies.
pub fn decode_roles(status: u16, body: &[u8]) -> Result<Vec<Role>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Roles {
        List(Vec<Role>),
        Paged(Page<Role>),
    }

    check(status, body)?;
    Ok(match serde_json::from_slice(body)? {
        Roles::List(roles) => roles,
        Roles::Paged(page) => page.content,
    })
}

/// Extracts a human-readable message from an error payload.
fn error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct Payload {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(Payload { message, error }) = serde_json::from_slice::<Payload>(body) {
        if let Some(text) = message.or(error).filter(|m| !m.trim().is_empty()) {
            return text;
        }
    }
    String::from_utf8_lossy(body).trim().to_string()
}
