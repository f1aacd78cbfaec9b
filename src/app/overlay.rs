//! Modal overlays drawn over the active list.
//!
//! While an overlay is open it receives every key: `j`/`k` move within menus,
//! typed characters edit the form buffer, Enter confirms and Esc cancels.

use crate::domain::{EditableField, Entity, Role, StatusKind};

/// A mutation waiting for the operator's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingMutation {
    /// Move to a status, named by its wire representation.
    Status { id: i64, status: &'static str },
    Suspend { id: i64 },
    Delete { id: i64 },
}

impl PendingMutation {
    /// Record the mutation targets.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Status { id, .. } | Self::Suspend { id } | Self::Delete { id } => *id,
        }
    }
}

/// One legal status target offered by the status menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub wire: &'static str,
    pub label: &'static str,
    /// Target has no outgoing transitions, so choosing it asks for confirmation.
    pub terminal: bool,
}

/// Modal state layered over a list screen.
///
/// Only one overlay is open at a time. Confirming a menu may replace it with a
/// [`Overlay::Confirm`] for terminal or destructive choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    StatusMenu {
        id: i64,
        title: String,
        options: Vec<StatusOption>,
        selected: usize,
    },
    Confirm {
        prompt: String,
        pending: PendingMutation,
    },
    RolePicker {
        user_id: i64,
        title: String,
        selected: usize,
    },
    EditForm {
        id: i64,
        title: String,
        fields: &'static [EditableField],
        /// Current values at open time, one per field.
        originals: Vec<String>,
        field: usize,
        buffer: String,
    },
}

impl Overlay {
    /// Status menu listing only the legal targets of `entity`'s current status.
    #[must_use]
    pub fn status_menu<E: Entity>(entity: &E) -> Self {
        let options = entity
            .status()
            .transitions()
            .iter()
            .map(|target| StatusOption {
                wire: target.as_str(),
                label: target.label(),
                terminal: target.transitions().is_empty(),
            })
            .collect();
        Self::StatusMenu {
            id: entity.id(),
            title: format!("Change status of {}", entity.title()),
            options,
            selected: 0,
        }
    }

    /// One-field-at-a-time edit form over `E`'s editable fields.
    ///
    /// # Parameters
    ///
    /// * `entity` - Record being edited; its current values seed the form
    ///
    /// # Returns
    ///
    /// An [`Overlay::EditForm`] focused on the first field, with the buffer holding
    /// that field's current value. Moving between fields reloads the buffer from
    /// the original value, discarding unconfirmed edits.
    #[must_use]
    pub fn edit_form<E: Entity>(entity: &E) -> Self {
        let originals: Vec<String> = E::EDITABLE.iter().map(|f| entity.field_value(f.key)).collect();
        let buffer = originals.first().cloned().unwrap_or_default();
        Self::EditForm {
            id: entity.id(),
            title: format!("Edit {}", entity.title()),
            fields: E::EDITABLE,
            originals,
            field: 0,
            buffer,
        }
    }

    /// Moves the menu cursor or switches the edited field.
    ///
    /// `roles` bounds the role picker cursor.
    pub fn move_down(&mut self, roles: &[Role]) {
        match self {
            Self::StatusMenu { options, selected, .. } => {
                *selected = (*selected + 1).min(options.len().saturating_sub(1));
            }
            Self::RolePicker { selected, .. } => {
                *selected = (*selected + 1).min(roles.len().saturating_sub(1));
            }
            Self::EditForm { fields, originals, field, buffer, .. } => {
                if *field + 1 < fields.len() {
                    *field += 1;
                    buffer.clone_from(&originals[*field]);
                }
            }
            Self::Confirm { .. } => {}
        }
    }

    /// Moves the menu cursor or the edited field back by one.
    pub fn move_up(&mut self) {
        match self {
            Self::StatusMenu { selected, .. } | Self::RolePicker { selected, .. } => {
                *selected = selected.saturating_sub(1);
            }
            Self::EditForm { originals, field, buffer, .. } => {
                if *field > 0 {
                    *field -= 1;
                    buffer.clone_from(&originals[*field]);
                }
            }
            Self::Confirm { .. } => {}
        }
    }

    /// Appends to the form buffer. Returns whether the overlay accepted text.
    pub fn push_char(&mut self, c: char) -> bool {
        if let Self::EditForm { buffer, .. } = self {
            buffer.push(c);
            true
        } else {
            false
        }
    }

    /// Removes the last buffer character. Returns whether the overlay accepted it.
    pub fn pop_char(&mut self) -> bool {
        if let Self::EditForm { buffer, .. } = self {
            buffer.pop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, AccountStatus};

    fn account(status: AccountStatus) -> Account {
        Account {
            id: 3,
            number: "001-22".into(),
            holder_name: "Rosa Diaz".into(),
            holder_email: "rosa@corp.cl".into(),
            holder_national_id: "11111111-1".into(),
            credit_limit: 1_500_000,
            balance: 0,
            status,
            opened_on: None,
        }
    }

    #[test]
    fn status_menu_offers_only_legal_targets() {
        let Overlay::StatusMenu { options, .. } = Overlay::status_menu(&account(AccountStatus::Active)) else {
            panic!("expected status menu");
        };
        let wires: Vec<_> = options.iter().map(|o| o.wire).collect();
        assert_eq!(wires, vec!["SUSPENDED", "CLOSED"]);
        assert!(options[1].terminal);
    }

    #[test]
    fn closed_account_offers_nothing() {
        let Overlay::StatusMenu { options, .. } = Overlay::status_menu(&account(AccountStatus::Closed)) else {
            panic!("expected status menu");
        };
        assert!(options.is_empty());
    }

    #[test]
    fn edit_form_switches_field_and_prefills() {
        let mut form = Overlay::edit_form(&account(AccountStatus::Active));
        assert!(form.push_char('!'));
        form.move_down(&[]);
        let Overlay::EditForm { field, buffer, .. } = &form else {
            panic!("expected edit form");
        };
        assert_eq!(*field, 1);
        assert_eq!(buffer, "1500000");
        form.move_up();
        let Overlay::EditForm { buffer, .. } = &form else {
            panic!("expected edit form");
        };
        assert_eq!(buffer, "Rosa Diaz");
    }
}
