//! Overview facade: every metric and series in one call

use chrono::NaiveDate;
use spendlens_config::Config;

use crate::aggregates::{
    average_withdrawal, highest_spending_category, latest_transaction, most_frequent_category,
    most_used_payment_method, recent_transactions, total_income, total_spending,
};
use crate::models::TransactionRecord;
use crate::reports::Overview;
use crate::series::{category_breakdown_series, monthly_spending_series};
use crate::time::MonthWindow;

/// Knobs for `compute_overview`
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsOptions {
    pub months_back: u32,
    /// End of the monthly window; today (UTC) when `None`
    pub reference_date: Option<NaiveDate>,
    pub recent_count: usize,
    pub category_palette: Vec<String>,
    pub monthly_palette: Vec<String>,
    pub uncategorized_label: String,
    pub unknown_payment_label: String,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AnalyticsOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            months_back: config.analytics.months_back,
            reference_date: config.analytics.reference_date,
            recent_count: config.analytics.recent_count,
            category_palette: config.charts.category_palette.clone(),
            monthly_palette: config.charts.monthly_palette.clone(),
            uncategorized_label: config.analytics.uncategorized_label.clone(),
            unknown_payment_label: config.analytics.unknown_payment_label.clone(),
        }
    }

    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = Some(reference_date);
        self
    }

    pub fn with_months_back(mut self, months_back: u32) -> Self {
        self.months_back = months_back;
        self
    }

    /// Monthly window, anchored on today when no reference date is set
    pub fn window(&self) -> MonthWindow {
        match self.reference_date {
            Some(reference) => MonthWindow::new(reference, self.months_back),
            None => MonthWindow::ending_today(self.months_back),
        }
    }
}

/// Derive the full overview from `records`
///
/// Never fails: empty input yields zeros, "N/A" labels and empty series.
pub fn compute_overview(records: &[TransactionRecord], options: &AnalyticsOptions) -> Overview {
    let window = options.window();
    log::debug!(
        "Computing overview over {} records, monthly window {}",
        records.len(),
        window.description()
    );

    let income = total_income(records);
    let spending = total_spending(records);

    Overview {
        transaction_count: records.len(),
        total_income: income,
        total_spending: spending,
        net_savings: income - spending,
        average_withdrawal: average_withdrawal(records),
        most_frequent_category: most_frequent_category(records, &options.uncategorized_label),
        highest_spending_category: highest_spending_category(records, &options.uncategorized_label),
        most_used_payment_method: most_used_payment_method(records, &options.unknown_payment_label),
        latest_transaction: latest_transaction(records).cloned(),
        recent_transactions: recent_transactions(records, options.recent_count),
        category_breakdown_series: category_breakdown_series(
            records,
            &options.category_palette,
            &options.uncategorized_label,
        ),
        monthly_spending_series: monthly_spending_series(records, &window, &options.monthly_palette),
        reference_date: window.reference(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::reports::HighestSpending;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord::new("1", dec("2500"), at(2024, 6, 1), TransactionType::Deposit)
                .with_category("Salary")
                .with_payment_method("Bank Transfer"),
            TransactionRecord::new("2", dec("42.10"), at(2024, 6, 3), TransactionType::Withdrawal)
                .with_category("Food")
                .with_payment_method("Credit Card")
                .with_merchant("Corner Market"),
            TransactionRecord::new("3", dec("900"), at(2024, 5, 1), TransactionType::Withdrawal)
                .with_category("Rent")
                .with_payment_method("Bank Transfer"),
            TransactionRecord::new("4", dec("17.90"), at(2024, 4, 20), TransactionType::Withdrawal)
                .with_category("Food")
                .with_payment_method("Credit Card"),
            TransactionRecord::new("5", dec("60"), at(2024, 6, 10), TransactionType::Other)
                .with_category("Transfer")
                .with_payment_method("Credit Card"),
        ]
    }

    #[test]
    fn test_overview_fields() {
        let options = AnalyticsOptions::default().with_reference_date(reference());
        let overview = compute_overview(&sample(), &options);

        assert_eq!(overview.transaction_count, 5);
        assert_eq!(overview.total_income, dec("2500"));
        assert_eq!(overview.total_spending, dec("960"));
        assert_eq!(overview.net_savings, dec("1540"));
        assert_eq!(overview.average_withdrawal, dec("320"));
        assert_eq!(overview.most_frequent_category, "Food");
        assert_eq!(
            overview.highest_spending_category,
            HighestSpending {
                category: "Rent".to_string(),
                amount: dec("900"),
            }
        );
        assert_eq!(overview.most_used_payment_method, "Credit Card");
        assert_eq!(overview.latest_transaction.as_ref().map(|r| r.id.as_str()), Some("5"));
        assert_eq!(overview.recent_transactions.len(), 5);
        assert_eq!(overview.recent_transactions[0].id, "5");
        assert_eq!(overview.category_breakdown_series.len(), 2);
        assert_eq!(overview.category_breakdown_series[0].label, "Rent");
        assert_eq!(overview.monthly_spending_series.len(), 6);
        assert_eq!(overview.monthly_spending_series[5].value, dec("42.10"));
        assert_eq!(overview.monthly_spending_series[4].value, dec("900"));
        assert_eq!(overview.monthly_spending_series[3].value, dec("17.90"));
        assert_eq!(overview.reference_date, reference());
    }

    #[test]
    fn test_overview_empty_input() {
        let options = AnalyticsOptions::default().with_reference_date(reference());
        let overview = compute_overview(&[], &options);

        assert_eq!(overview.transaction_count, 0);
        assert_eq!(overview.total_income, Decimal::ZERO);
        assert_eq!(overview.total_spending, Decimal::ZERO);
        assert_eq!(overview.net_savings, Decimal::ZERO);
        assert_eq!(overview.average_withdrawal, Decimal::ZERO);
        assert_eq!(overview.most_frequent_category, "N/A");
        assert_eq!(overview.highest_spending_category, HighestSpending::not_available());
        assert_eq!(overview.most_used_payment_method, "N/A");
        assert!(overview.latest_transaction.is_none());
        assert!(overview.recent_transactions.is_empty());
        assert!(overview.category_breakdown_series.is_empty());
        assert!(overview.monthly_spending_series.is_empty());
    }

    #[test]
    fn test_overview_is_deterministic() {
        let records = sample();
        let options = AnalyticsOptions::default().with_reference_date(reference());

        assert_eq!(compute_overview(&records, &options), compute_overview(&records, &options));
    }

    #[test]
    fn test_overview_respects_options() {
        let options = AnalyticsOptions {
            recent_count: 2,
            ..AnalyticsOptions::default()
        }
        .with_reference_date(reference())
        .with_months_back(2);

        let overview = compute_overview(&sample(), &options);

        assert_eq!(overview.recent_transactions.len(), 2);
        assert_eq!(overview.monthly_spending_series.len(), 2);
        assert_eq!(overview.monthly_spending_series[0].label, "May");
    }

    #[test]
    fn test_overview_serializes() {
        let options = AnalyticsOptions::default().with_reference_date(reference());
        let value = serde_json::to_value(compute_overview(&sample(), &options)).unwrap();

        assert_eq!(value["total_spending"], "960.00");
        assert_eq!(value["highest_spending_category"]["category"], "Rent");
        assert_eq!(value["reference_date"], "2024-06-15");
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.analytics.months_back = 3;
        config.analytics.uncategorized_label = "Misc".to_string();

        let options = AnalyticsOptions::from_config(&config);
        assert_eq!(options.months_back, 3);
        assert_eq!(options.uncategorized_label, "Misc");
        assert_eq!(options.category_palette, config.charts.category_palette);
    }
}
