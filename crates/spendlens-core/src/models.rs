//! Transaction record model

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a transaction's cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Incoming money (income)
    Deposit,
    /// Outgoing money (expense)
    Withdrawal,
    /// Any other type string; counted by frequency rankings only
    #[serde(other)]
    Other,
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(TransactionType::Deposit),
            "withdrawal" => Ok(TransactionType::Withdrawal),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "Deposit"),
            TransactionType::Withdrawal => write!(f, "Withdrawal"),
            TransactionType::Other => write!(f, "Other"),
        }
    }
}

/// One financial event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque unique identifier
    pub id: String,
    /// Non-negative amount; direction is carried by `transaction_type`
    pub amount: Decimal,
    /// When the event happened
    pub date: NaiveDateTime,
    /// Free-text category; blank means uncategorized
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// How the transaction was settled; blank means unknown
    #[serde(default)]
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionRecord {
    /// Create a record with empty category and payment method
    pub fn new(
        id: impl Into<String>,
        amount: Decimal,
        date: NaiveDateTime,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            date,
            category: String::new(),
            transaction_type,
            payment_method: String::new(),
            merchant_name: None,
            description: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = payment_method.into();
        self
    }

    pub fn with_merchant(mut self, merchant_name: impl Into<String>) -> Self {
        self.merchant_name = Some(merchant_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_deposit(&self) -> bool {
        self.transaction_type == TransactionType::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.transaction_type == TransactionType::Withdrawal
    }

    /// Calendar date of the event
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Category used for grouping, with blank values mapped to `fallback`
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank_or(&self.category, fallback)
    }

    /// Payment method used for grouping, with blank values mapped to `fallback`
    pub fn payment_method_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank_or(&self.payment_method, fallback)
    }
}

fn non_blank_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}
