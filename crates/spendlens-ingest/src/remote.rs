//! Remote `transactions` rows and their normalization into records

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use spendlens_core::{TransactionRecord, TransactionType};
use std::str::FromStr;

use crate::error::{IngestError, IngestResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemotePaymentMethod {
    #[serde(default)]
    pub payment_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteMerchant {
    #[serde(default)]
    pub merchant_name: Option<String>,
}

/// One row of the remote transactions table, joined with payment method and merchant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteTransaction {
    /// Numeric or string key
    #[serde(default)]
    pub transaction_id: Option<Value>,
    /// Number or numeric string
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub t_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_method: Option<RemotePaymentMethod>,
    #[serde(default)]
    pub merchant: Option<RemoteMerchant>,
}

impl RemoteTransaction {
    /// Validate and convert into an engine record
    pub fn into_record(self) -> IngestResult<TransactionRecord> {
        let id = match self.transaction_id {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                return Err(IngestError::MissingField {
                    field: "transaction_id".to_string(),
                })
            }
            Some(other) => {
                return Err(IngestError::InvalidFormat {
                    message: format!("transaction_id must be a string or number, got {}", other),
                })
            }
        };

        let amount = match self.amount {
            Some(value) => parse_amount(&id, &value)?,
            None => {
                return Err(IngestError::MissingField {
                    field: "amount".to_string(),
                })
            }
        };

        let date = match self.t_date {
            Some(raw) => parse_t_date(&id, &raw)?,
            None => {
                return Err(IngestError::MissingField {
                    field: "t_date".to_string(),
                })
            }
        };

        let raw_type = self.transaction_type.unwrap_or_default();
        let transaction_type = TransactionType::from_str(&raw_type).unwrap_or_else(|_| {
            log::warn!(
                "Transaction {} has unrecognized type '{}', excluded from totals",
                id,
                raw_type
            );
            TransactionType::Other
        });

        let mut record = TransactionRecord::new(id, amount, date, transaction_type)
            .with_category(self.category.unwrap_or_default())
            .with_payment_method(
                self.payment_method
                    .and_then(|p| p.payment_type)
                    .unwrap_or_default(),
            );
        if let Some(name) = self.merchant.and_then(|m| m.merchant_name) {
            record = record.with_merchant(name);
        }
        if let Some(description) = self.description {
            record = record.with_description(description);
        }

        Ok(record)
    }
}

fn parse_amount(id: &str, value: &Value) -> IngestResult<Decimal> {
    let invalid = || IngestError::InvalidAmount {
        transaction_id: id.to_string(),
        value: value.to_string(),
    };

    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(invalid()),
    };
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid());
    }
    Ok(amount)
}

/// Parse `t_date`: RFC 3339 (converted to UTC), naive date-time, or date only
fn parse_t_date(id: &str, raw: &str) -> IngestResult<NaiveDateTime> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    if let Some(dt) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt);
    }

    Err(IngestError::InvalidDate {
        transaction_id: id.to_string(),
        value: raw.to_string(),
    })
}
