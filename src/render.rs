//! Plain-text rendering of the overview

use spendlens_config::CurrencyConfig;
use spendlens_core::{Overview, TransactionRecord};
use spendlens_utils::{format_amount, format_display_date, format_outflow, format_percentage};

const LABEL_WIDTH: usize = 26;

fn signed_amount(record: &TransactionRecord, currency: &CurrencyConfig) -> String {
    if record.is_withdrawal() {
        format_outflow(record.amount, currency)
    } else {
        format_amount(record.amount, currency)
    }
}

fn transaction_line(record: &TransactionRecord, currency: &CurrencyConfig) -> String {
    let title = record
        .merchant_name
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(&record.category);
    format!(
        "{:<14}{:<24}{:>14}",
        format_display_date(&record.date),
        title,
        signed_amount(record, currency)
    )
}

/// Render the overview as a multi-section text report
pub fn render_text(overview: &Overview, currency: &CurrencyConfig) -> String {
    let mut out = String::new();
    let amount = |v| format_amount(v, currency);

    out.push_str(&format!(
        "Spending overview: {} transactions, window ending {}\n",
        overview.transaction_count, overview.reference_date
    ));

    out.push_str("\nTotals\n");
    for (label, value) in [
        ("Income", overview.total_income),
        ("Spending", overview.total_spending),
        ("Net savings", overview.net_savings),
        ("Average withdrawal", overview.average_withdrawal),
    ] {
        out.push_str(&format!("  {:<w$}{}\n", label, amount(value), w = LABEL_WIDTH));
    }

    let highest = &overview.highest_spending_category;
    let latest = overview
        .latest_transaction
        .as_ref()
        .map(|r| transaction_line(r, currency))
        .unwrap_or_else(|| "N/A".to_string());
    out.push_str("\nHighlights\n");
    out.push_str(&format!(
        "  {:<w$}{}\n",
        "Most frequent category",
        overview.most_frequent_category,
        w = LABEL_WIDTH
    ));
    out.push_str(&format!(
        "  {:<w$}{} ({})\n",
        "Highest spending category",
        highest.category,
        amount(highest.amount),
        w = LABEL_WIDTH
    ));
    out.push_str(&format!(
        "  {:<w$}{}\n",
        "Most used payment method",
        overview.most_used_payment_method,
        w = LABEL_WIDTH
    ));
    out.push_str(&format!("  {:<w$}{}\n", "Latest transaction", latest, w = LABEL_WIDTH));

    out.push_str("\nSpending by category\n");
    if overview.category_breakdown_series.is_empty() {
        out.push_str("  No spending recorded\n");
    }
    for slice in &overview.category_breakdown_series {
        out.push_str(&format!(
            "  {:<24}{:>14}{:>8}\n",
            slice.label,
            amount(slice.value),
            format_percentage(slice.percentage)
        ));
    }

    out.push_str("\nMonthly spending\n");
    if overview.monthly_spending_series.is_empty() {
        out.push_str("  No spending recorded\n");
    }
    for bucket in &overview.monthly_spending_series {
        out.push_str(&format!(
            "  {:<5}{:<6}{:>14}\n",
            bucket.label,
            bucket.month.format("%Y"),
            amount(bucket.value)
        ));
    }

    out.push_str("\nRecent transactions\n");
    if overview.recent_transactions.is_empty() {
        out.push_str("  No transactions\n");
    }
    for record in &overview.recent_transactions {
        out.push_str(&format!("  {}\n", transaction_line(record, currency)));
    }

    out.trim_end().to_string()
}
