use serde::{Deserialize, Serialize};
use serde_json::Value;
use super::loose;
use super::Locale;
use crate::utils::format_progress_date;

/// Withdrawal of review fees, as listed for an expert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub withdrawal_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub assignment_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub paper_id: Option<String>,
    #[serde(default)]
    pub paper_title_zh: Option<String>,
    #[serde(default)]
    pub paper_title_en: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub request_date: Option<String>,
    #[serde(default)]
    pub withdrawal_date: Option<String>,
}

impl WithdrawalRecord {
    /// Request date, falling back to the payout date
    pub fn display_date(&self) -> Option<String> {
        loose::non_empty(&self.request_date)
            .or_else(|| loose::non_empty(&self.withdrawal_date))
            .map(format_progress_date)
    }

    /// Status as reported, or the processing text while the server has none
    pub fn status_text(&self, locale: Locale) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| locale.processing_text().to_string())
    }
}

/// Find a withdrawal by id, comparing ids as text
pub fn find_withdrawal<'a>(records: &'a [WithdrawalRecord], withdrawal_id: &str) -> Option<&'a WithdrawalRecord> {
    records
        .iter()
        .find(|r| r.withdrawal_id.as_deref() == Some(withdrawal_id))
}

/// Bank account on an expert's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub bank_account_id: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_holder: Option<String>,
}

impl BankAccount {
    /// Value submitted as `bank_account_id`
    pub fn option_value(&self) -> String {
        loose::non_empty(&self.id)
            .or_else(|| loose::non_empty(&self.bank_account_id))
            .unwrap_or_default()
            .to_string()
    }

    pub fn option_label(&self) -> String {
        format!(
            "{} - {}",
            self.bank_name.as_deref().unwrap_or(""),
            self.account_holder.as_deref().unwrap_or("")
        )
    }
}

/// Bank accounts from either an expert profile (`bank_accounts`) or a bare list
///
/// A profile without accounts, or null, yields an empty list.
pub fn bank_accounts_from_value(value: Value) -> serde_json::Result<Vec<BankAccount>> {
    match value {
        Value::Object(mut profile) => match profile.remove("bank_accounts") {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(list) => serde_json::from_value(list),
        },
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other),
    }
}

/// Withdrawal request form
///
/// `amount` stays a raw JSON value because the form posts whatever the
/// number input holds; it is coerced during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    #[serde(default)]
    pub amount: Value,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub bank_account_id: Option<String>,
}

impl Default for WithdrawalRequest {
    fn default() -> Self {
        Self {
            amount: Value::from(0),
            bank_account_id: None,
        }
    }
}
