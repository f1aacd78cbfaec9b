//! The `Entity` abstraction shared by users and accounts.
//!
//! List controllers, service wrappers and the view model are generic over this
//! trait, so both screens run the exact same search/pagination machinery.

use super::status::StatusKind;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A backend record identified by an integer ID and carrying a closed status.
pub trait Entity: Clone + Debug + PartialEq + DeserializeOwned + 'static {
    /// The entity's status enumeration.
    type Status: StatusKind;

    /// Singular noun used in notifications ("user", "account").
    const KIND: &'static str;

    /// Fields the edit form may change, in display order.
    const EDITABLE: &'static [EditableField];

    fn id(&self) -> i64;

    fn status(&self) -> Self::Status;

    /// Primary display text (the NAME column).
    fn title(&self) -> &str;

    /// Secondary display text (the DETAIL column).
    fn detail(&self) -> String;

    /// Current value of an editable field, used to prefill the edit form.
    fn field_value(&self, key: &str) -> String;
}

/// How an edit form input is validated and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    /// Non-negative whole currency units.
    Amount,
}

/// A single field the edit form can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditableField {
    /// JSON key sent in the update patch.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl EditableField {
    /// Validates raw form input and converts it to the JSON patch value.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when the input is empty, is not an e-mail
    /// address for [`FieldKind::Email`], or is not a non-negative integer for
    /// [`FieldKind::Amount`].
    pub fn parse(&self, input: &str) -> std::result::Result<serde_json::Value, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(format!("{} cannot be empty", self.label));
        }
        match self.kind {
            FieldKind::Text => Ok(serde_json::Value::String(input.to_string())),
            FieldKind::Email => {
                if input.contains('@') && !input.starts_with('@') && !input.ends_with('@') {
                    Ok(serde_json::Value::String(input.to_string()))
                } else {
                    Err(format!("{} must be an e-mail address", self.label))
                }
            }
            FieldKind::Amount => {
                let digits: String = input.chars().filter(|c| *c != '.').collect();
                digits
                    .parse::<u64>()
                    .map(serde_json::Value::from)
                    .map_err(|_| format!("{} must be a whole positive amount", self.label))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: EditableField = EditableField { key: "creditLimit", label: "Credit limit", kind: FieldKind::Amount };
    const MAIL: EditableField = EditableField { key: "email", label: "E-mail", kind: FieldKind::Email };

    #[test]
    fn amount_accepts_grouped_digits() {
        assert_eq!(LIMIT.parse("1.500.000"), Ok(serde_json::json!(1_500_000)));
    }

    #[test]
    fn amount_rejects_negative_and_text() {
        assert!(LIMIT.parse("-3").is_err());
        assert!(LIMIT.parse("lots").is_err());
    }

    #[test]
    fn email_requires_at_sign() {
        assert!(MAIL.parse("maria@corp.cl").is_ok());
        assert!(MAIL.parse("maria").is_err());
        assert!(MAIL.parse("   ").is_err());
    }
}
