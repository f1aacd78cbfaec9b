//! Generic backend wrapper for a listable, searchable entity collection.
//!
//! Users and accounts expose the same REST shape under different path roots, so a
//! single wrapper parameterized by the entity type serves both. Each operation only
//! *describes* the call; the plugin runtime performs it and the response decoders
//! in [`crate::service::response`] interpret the result.

use super::endpoint::Endpoint;
use super::request::{HttpCall, Method, Resource};
use crate::domain::error::Result;
use crate::domain::{Account, Entity, StatusKind, User};
use std::marker::PhantomData;

/// Request builder for one entity collection (`/users`, `/accounts`).
#[derive(Debug, Clone)]
pub struct EntityService<E> {
    endpoint: Endpoint,
    root: &'static str,
    resource: Resource,
    _entity: PhantomData<E>,
}

/// Wrapper for `/users`.
pub type UserService = EntityService<User>;

/// Wrapper for `/accounts`.
pub type AccountService = EntityService<Account>;

impl UserService {
    #[must_use]
    pub fn users(endpoint: Endpoint) -> Self {
        Self::new(endpoint, "users", Resource::Users)
    }
}

impl AccountService {
    #[must_use]
    pub fn accounts(endpoint: Endpoint) -> Self {
        Self::new(endpoint, "accounts", Resource::Accounts)
    }
}

impl<E: Entity> EntityService<E> {
    #[must_use]
    pub const fn new(endpoint: Endpoint, root: &'static str, resource: Resource) -> Self {
        Self { endpoint, root, resource, _entity: PhantomData }
    }

    /// Collection this wrapper talks to.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        self.resource
    }

    fn paging(page: u32, size: u32) -> [(&'static str, String); 2] {
        [("page", page.to_string()), ("size", size.to_string())]
    }

    /// `GET /{root}?page=&size=`
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn list_by_page(&self, page: u32, size: u32) -> Result<HttpCall> {
        let url = self.endpoint.url(&[self.root], &Self::paging(page, size))?;
        Ok(HttpCall::get(url))
    }

    /// `GET /{root}/status/{STATUS}?page=&size=`
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn find_by_status(&self, status: E::Status, page: u32, size: u32) -> Result<HttpCall> {
        let url = self
            .endpoint
            .url(&[self.root, "status", status.as_str()], &Self::paging(page, size))?;
        Ok(HttpCall::get(url))
    }

    /// `GET /{root}/search?name=&page=&size=`
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn find_by_name_contains(&self, text: &str, page: u32, size: u32) -> Result<HttpCall> {
        let [page, size] = Self::paging(page, size);
        let url = self
            .endpoint
            .url(&[self.root, "search"], &[("name", text.to_string()), page, size])?;
        Ok(HttpCall::get(url))
    }

    /// `GET /{root}/email/{email}`, answered with one entity or 404.
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn find_by_exact_email(&self, email: &str) -> Result<HttpCall> {
        let url = self.endpoint.url(&[self.root, "email", email], &[])?;
        Ok(HttpCall::get(url))
    }

    /// `GET /{root}/national-id/{id}`, answered with one entity or 404.
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn find_by_exact_national_id(&self, national_id: &str) -> Result<HttpCall> {
        let url = self.endpoint.url(&[self.root, "national-id", national_id], &[])?;
        Ok(HttpCall::get(url))
    }

    /// `PUT /{root}/{id}/status` with `{"status": STATUS}`.
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn update_status(&self, id: i64, status: E::Status) -> Result<HttpCall> {
        let url = self.endpoint.url(&[self.root, &id.to_string(), "status"], &[])?;
        Ok(HttpCall {
            method: Method::Put,
            url,
            body: Some(serde_json::json!({ "status": status.as_str() })),
        })
    }

    /// `POST /{root}/{id}/suspend`
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn suspend(&self, id: i64) -> Result<HttpCall> {
        let url = self.endpoint.url(&[self.root, &id.to_string(), "suspend"], &[])?;
        Ok(HttpCall { method: Method::Post, url, body: None })
    }

    /// `DELETE /{root}/{id}`
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn delete(&self, id: i64) -> Result<HttpCall> {
        let url = self.endpoint.url(&[self.root, &id.to_string()], &[])?;
        Ok(HttpCall { method: Method::Delete, url, body: None })
    }

    /// `PUT /{root}/{id}` with a partial JSON object of changed fields.
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn update(&self, id: i64, fields: serde_json::Map<String, serde_json::Value>) -> Result<HttpCall> {
        let url = self.endpoint.url(&[self.root, &id.to_string()], &[])?;
        Ok(HttpCall {
            method: Method::Put,
            url,
            body: Some(serde_json::Value::Object(fields)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountStatus, UserStatus};

    fn users() -> UserService {
        UserService::users(Endpoint::parse("http://backend/api").unwrap())
    }

    #[test]
    fn status_search_uses_wire_name() {
        let call = users().find_by_status(UserStatus::Suspended, 2, 10).unwrap();
        assert_eq!(call.method, Method::Get);
        assert_eq!(call.url, "http://backend/api/users/status/SUSPENDED?page=2&size=10");
    }

    #[test]
    fn email_lookup_is_a_single_path_segment() {
        let call = users().find_by_exact_email("a@b.com").unwrap();
        assert_eq!(call.url, "http://backend/api/users/email/a@b.com");
    }

    #[test]
    fn account_status_change_sends_body() {
        let accounts = AccountService::accounts(Endpoint::parse("http://backend/api").unwrap());
        let call = accounts.update_status(12, AccountStatus::Closed).unwrap();
        assert_eq!(call.method, Method::Put);
        assert_eq!(call.url, "http://backend/api/accounts/12/status");
        assert_eq!(call.body, Some(serde_json::json!({"status": "CLOSED"})));
    }

    #[test]
    fn delete_has_no_body() {
        let call = users().delete(5).unwrap();
        assert_eq!(call.method, Method::Delete);
        assert!(call.body.is_none());
    }
}
