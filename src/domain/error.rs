//! Error types for the zadmin plugin.
//!
//! This module defines the centralized error type [`AdminError`] and a type alias
//! [`Result`] used throughout the plugin. Backend failures are deliberately flat:
//! a call either succeeded or it did not, and the only detail carried forward is
//! whatever message the service payload offered for the user.

use thiserror::Error;

/// The main error type for zadmin operations.
///
/// # Examples
///
/// ```
/// use zadmin::AdminError;
///
/// let err = AdminError::Service { status: 409, message: "account has balance".into() };
/// assert_eq!(err.user_message(), "account has balance");
/// ```
#[derive(Debug, Error)]
pub enum AdminError {
    /// The backend answered with a non-success status.
    ///
    /// `message` is taken from the payload's `message` / `error` field when the
    /// backend provides one, otherwise it is the raw response text.
    #[error("service error ({status}): {message}")]
    Service {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Ad-hoc message suitable for showing to the user.
        message: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request URL could not be built from the configured base URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// A web request result arrived with a context map we cannot interpret.
    #[error("unrecognized request context: {0}")]
    Context(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdminError {
    /// Text shown to the user in the notification banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Service { status, .. } => format!("request failed with status {status}"),
            other => other.to_string(),
        }
    }
}

/// A specialized `Result` type for zadmin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
