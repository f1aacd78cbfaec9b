//! Closed status enumerations for users and accounts.
//!
//! Both entity kinds carry a three-state status owned by the backend. The client
//! never decides whether a transition succeeds, but it does know which targets are
//! legal from each state, so menus only ever offer valid moves.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Behaviour shared by the status enums of every entity kind.
pub trait StatusKind: Copy + Eq + Debug + Serialize + 'static {
    /// Every variant, in display order. Used to cycle the status filter.
    const ALL: &'static [Self];

    /// Wire representation (also used in URL paths).
    fn as_str(self) -> &'static str;

    /// Human label for the UI.
    fn label(self) -> &'static str;

    /// Statuses this one may legally move to.
    fn transitions(self) -> &'static [Self];

    /// Whether `target` is a legal transition from `self`.
    fn can_transition_to(self, target: Self) -> bool {
        self.transitions().contains(&target)
    }
}

/// Lifecycle status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl StatusKind for UserStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Inactive, Self::Suspended];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Suspended => "Suspended",
        }
    }

    fn transitions(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Inactive, Self::Suspended],
            Self::Inactive | Self::Suspended => &[Self::Active],
        }
    }
}

/// Lifecycle status of a client account. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Suspended,
    Closed,
}

impl StatusKind for AccountStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Suspended, Self::Closed];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Closed => "CLOSED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::Closed => "Closed",
        }
    }

    fn transitions(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Suspended, Self::Closed],
            Self::Suspended => &[Self::Active, Self::Closed],
            Self::Closed => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_accounts_are_terminal() {
        assert!(AccountStatus::Closed.transitions().is_empty());
        assert!(!AccountStatus::Closed.can_transition_to(AccountStatus::Active));
    }

    #[test]
    fn user_transitions_never_target_self() {
        for status in UserStatus::ALL {
            assert!(!status.can_transition_to(*status), "{status:?}");
        }
    }

    #[test]
    fn suspended_account_can_be_reactivated_or_closed() {
        assert_eq!(
            AccountStatus::Suspended.transitions(),
            &[AccountStatus::Active, AccountStatus::Closed]
        );
    }

    #[test]
    fn wire_names_match_serde() {
        let json = serde_json::to_string(&UserStatus::Inactive).unwrap();
        assert_eq!(json, format!("\"{}\"", UserStatus::Inactive.as_str()));
        let parsed: AccountStatus = serde_json::from_str("\"CLOSED\"").unwrap();
        assert_eq!(parsed, AccountStatus::Closed);
    }
}
