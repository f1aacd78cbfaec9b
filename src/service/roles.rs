//! Role catalogue and role assignment wrapper.

use super::endpoint::Endpoint;
use super::request::{HttpCall, Method};
use crate::domain::error::Result;

/// Request builder for `/roles` and user role grants.
#[derive(Debug, Clone)]
pub struct RoleService {
    endpoint: Endpoint,
}

impl RoleService {
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// `GET /roles`
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn list(&self) -> Result<HttpCall> {
        Ok(HttpCall::get(self.endpoint.url(&["roles"], &[])?))
    }

    /// `POST /users/{user}/roles/{role}`
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures.
    pub fn assign(&self, user_id: i64, role_id: i64) -> Result<HttpCall> {
        let url = self.endpoint.url(
            &["users", &user_id.to_string(), "roles", &role_id.to_string()],
            &[],
        )?;
        Ok(HttpCall { method: Method::Post, url, body: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_targets_the_user() {
        let roles = RoleService::new(Endpoint::parse("http://backend").unwrap());
        let call = roles.assign(4, 2).unwrap();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.url, "http://backend/users/4/roles/2");
    }
}
