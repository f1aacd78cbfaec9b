//! User domain model.

use super::entity::{EditableField, Entity, FieldKind};
use super::status::UserStatus;
use serde::{Deserialize, Serialize};

/// A console operator or client user as returned by the backend.
///
/// The client holds a read-mostly copy. Staleness is resolved by re-fetching after
/// every mutating action, never by patching the local copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// National identifier in `12345678-9` form.
    pub national_id: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: UserStatus,
    /// Names of the roles granted to this user.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub created_at: Option<chrono::NaiveDate>,
}

const USER_FIELDS: &[EditableField] = &[
    EditableField { key: "name", label: "Name", kind: FieldKind::Text },
    EditableField { key: "email", label: "E-mail", kind: FieldKind::Email },
    EditableField { key: "phone", label: "Phone", kind: FieldKind::Text },
];

impl Entity for User {
    type Status = UserStatus;

    const KIND: &'static str = "user";
    const EDITABLE: &'static [EditableField] = USER_FIELDS;

    fn id(&self) -> i64 {
        self.id
    }

    fn status(&self) -> UserStatus {
        self.status
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn detail(&self) -> String {
        if self.roles.is_empty() {
            format!("{} · {}", self.email, self.national_id)
        } else {
            format!("{} · {} · {}", self.email, self.national_id, self.roles.join(","))
        }
    }

    fn field_value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}
