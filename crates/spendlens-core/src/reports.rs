//! Result structures handed to the presentation layer

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendlens_config::NOT_AVAILABLE;

use crate::models::TransactionRecord;

/// Category with the largest withdrawal total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighestSpending {
    pub category: String,
    pub amount: Decimal,
}

impl HighestSpending {
    /// Result when there are no withdrawals
    pub fn not_available() -> Self {
        Self {
            category: NOT_AVAILABLE.to_string(),
            amount: Decimal::ZERO,
        }
    }
}

/// One slice of the category breakdown (pie) chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub label: String,
    /// Withdrawal total for this category
    pub value: Decimal,
    /// Share of all withdrawals, rounded to one decimal
    pub percentage: f64,
    pub color: String,
}

/// One bar of the monthly spending chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Three-letter month name
    pub label: String,
    /// First day of the month
    pub month: NaiveDate,
    /// Withdrawal total for the month
    pub value: Decimal,
    pub color: String,
}

/// Everything the analytics screen shows, derived from one record list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub transaction_count: usize,
    pub total_income: Decimal,
    pub total_spending: Decimal,
    pub net_savings: Decimal,
    pub average_withdrawal: Decimal,
    pub most_frequent_category: String,
    pub highest_spending_category: HighestSpending,
    pub most_used_payment_method: String,
    pub latest_transaction: Option<TransactionRecord>,
    pub recent_transactions: Vec<TransactionRecord>,
    pub category_breakdown_series: Vec<CategorySlice>,
    pub monthly_spending_series: Vec<MonthlyBucket>,
    /// Date the monthly window ends on
    pub reference_date: NaiveDate,
}
