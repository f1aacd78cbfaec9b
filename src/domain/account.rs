//! Client account domain model.

use super::entity::{EditableField, Entity, FieldKind};
use super::status::AccountStatus;
use serde::{Deserialize, Serialize};

/// A client account. Monetary amounts are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub number: String,
    pub holder_name: String,
    pub holder_email: String,
    pub holder_national_id: String,
    pub credit_limit: i64,
    #[serde(default)]
    pub balance: i64,
    pub status: AccountStatus,
    #[serde(default)]
    pub opened_on: Option<chrono::NaiveDate>,
}

const ACCOUNT_FIELDS: &[EditableField] = &[
    EditableField { key: "holderName", label: "Holder name", kind: FieldKind::Text },
    EditableField { key: "creditLimit", label: "Credit limit", kind: FieldKind::Amount },
];

impl Entity for Account {
    type Status = AccountStatus;

    const KIND: &'static str = "account";
    const EDITABLE: &'static [EditableField] = ACCOUNT_FIELDS;

    fn id(&self) -> i64 {
        self.id
    }

    fn status(&self) -> AccountStatus {
        self.status
    }

    fn title(&self) -> &str {
        &self.holder_name
    }

    fn detail(&self) -> String {
        format!(
            "#{} · limit {} · balance {}",
            self.number,
            format_amount(self.credit_limit),
            format_amount(self.balance)
        )
    }

    fn field_value(&self, key: &str) -> String {
        match key {
            "holderName" => self.holder_name.clone(),
            "creditLimit" => self.credit_limit.to_string(),
            _ => String::new(),
        }
    }
}

/// Formats an amount with `.` thousands separators, e.g. `1.500.000`.
#[must_use]
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_amounts_with_separators() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1_500_000), "1.500.000");
        assert_eq!(format_amount(-25_000), "-25.000");
    }

    #[test]
    fn parses_opened_on_date() {
        let json = r#"{"id":3,"number":"0001-22","holderName":"Luis","holderEmail":"l@x.cl",
            "holderNationalId":"22222222-2","creditLimit":500000,"status":"SUSPENDED","openedOn":"2024-03-01"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.balance, 0);
        assert_eq!(account.status, AccountStatus::Suspended);
        assert_eq!(
            account.opened_on,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }
}
