//! Outgoing request descriptions and the context that travels with them.
//!
//! The plugin runtime executes requests with Zellij's `web_request`, which hands
//! back an opaque string map alongside the response. [`RequestContext`] is what we
//! store in that map so the handler knows, when the response arrives, which list
//! or mutation it belongs to.

use crate::domain::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the serialized context is stored in the Zellij context map.
const CONTEXT_KEY: &str = "zadmin";

/// HTTP verbs the backend wrappers use. Mirrors what Zellij can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully built HTTP call, before any context is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpCall {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl HttpCall {
    pub(crate) fn get(url: String) -> Self {
        Self { method: Method::Get, url, body: None }
    }

    /// Attaches a context, producing a request ready for the runtime.
    #[must_use]
    pub fn with_context(self, context: RequestContext) -> ServiceRequest {
        ServiceRequest { call: self, context }
    }
}

/// A request the runtime should execute, tagged with its meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub call: HttpCall,
    pub context: RequestContext,
}

impl ServiceRequest {
    /// Request body as bytes, empty when there is none.
    #[must_use]
    pub fn body_bytes(&self) -> Vec<u8> {
        self.call
            .body
            .as_ref()
            .map(|body| body.to_string().into_bytes())
            .unwrap_or_default()
    }

    /// Headers sent with every request.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if self.call.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers
    }
}

/// Which backend collection a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Users,
    Accounts,
    Roles,
}

/// Whether a fetch replaces the accumulated list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchMode {
    Reset,
    Append,
}

/// Expected payload shape of a fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseShape {
    /// `{content, last}` listing page.
    Page,
    /// One entity, or 404 when absent.
    Single,
}

/// Mutating calls, named for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    UpdateStatus,
    Suspend,
    Delete,
    Update,
}

impl MutationKind {
    /// Past-tense verb for success notifications.
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::UpdateStatus => "status updated",
            Self::Suspend => "suspended",
            Self::Delete => "deleted",
            Self::Update => "updated",
        }
    }
}

/// What a request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purpose {
    Fetch {
        mode: FetchMode,
        shape: ResponseShape,
        page: u32,
        /// Issue sequence of the owning controller when the fetch started.
        seq: u64,
    },
    Mutation {
        kind: MutationKind,
        id: i64,
    },
    RoleList,
    RoleAssign {
        user_id: i64,
        role_id: i64,
    },
}

/// Meaning of an in-flight request, round-tripped through the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub resource: Resource,
    pub purpose: Purpose,
}

impl RequestContext {
    #[must_use]
    pub const fn new(resource: Resource, purpose: Purpose) -> Self {
        Self { resource, purpose }
    }

    /// Encodes the context into the map handed to `web_request`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Decode`] if serialization fails.
    pub fn to_map(&self) -> Result<BTreeMap<String, String>> {
        let mut map = BTreeMap::new();
        map.insert(CONTEXT_KEY.to_string(), serde_json::to_string(self)?);
        Ok(map)
    }

    /// Recovers the context from a `WebRequestResult` context map.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Context`] when the key is missing and
    /// [`AdminError::Decode`] when it does not parse.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let raw = map
            .get(CONTEXT_KEY)
            .ok_or_else(|| AdminError::Context(format!("missing `{CONTEXT_KEY}` key")))?;
        Ok(serde_json::from_str(raw)?)
    }
}
