//! Chart-ready series builders

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::aggregates::group_in_order;
use crate::models::TransactionRecord;
use crate::reports::{CategorySlice, MonthlyBucket};
use crate::time::{month_label, MonthWindow};

fn palette_color(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        return String::new();
    }
    palette[index % palette.len()].clone()
}

fn percentage_of(value: Decimal, total: Decimal) -> f64 {
    (value / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Withdrawal totals per category, largest first
///
/// Colors follow the order categories are first seen, before sorting.
/// Returns an empty series when nothing was withdrawn.
pub fn category_breakdown_series(
    records: &[TransactionRecord],
    palette: &[String],
    uncategorized: &str,
) -> Vec<CategorySlice> {
    let sums = group_in_order(
        records
            .iter()
            .filter(|r| r.is_withdrawal())
            .map(|r| (r.category_or(uncategorized), r.amount)),
    );
    let total: Decimal = sums.iter().map(|(_, v)| *v).sum();
    if total.is_zero() {
        return Vec::new();
    }

    let mut slices: Vec<CategorySlice> = sums
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| CategorySlice {
            label: label.to_string(),
            value,
            percentage: percentage_of(value, total),
            color: palette_color(palette, i),
        })
        .collect();

    // sort_by is stable: equal totals keep first-seen order
    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices
}

/// Dense withdrawal totals for each month of `window`, oldest first
///
/// Every month of the window gets a bucket, even with no matching records.
/// Only an empty record list yields an empty series.
pub fn monthly_spending_series(
    records: &[TransactionRecord],
    window: &MonthWindow,
    palette: &[String],
) -> Vec<MonthlyBucket> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut buckets: Vec<MonthlyBucket> = window
        .months()
        .into_iter()
        .enumerate()
        .map(|(i, month)| MonthlyBucket {
            label: month_label(month),
            month,
            value: Decimal::ZERO,
            color: palette_color(palette, i),
        })
        .collect();

    for record in records.iter().filter(|r| r.is_withdrawal()) {
        if let Some(i) = window.bucket_index(record.day()) {
            buckets[i].value += record.amount;
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn palette(colors: &[&str]) -> Vec<String> {
        colors.iter().map(|c| c.to_string()).collect()
    }

    fn spend(id: &str, amount: &str, category: &str, when: NaiveDateTime) -> TransactionRecord {
        TransactionRecord::new(id, dec(amount), when, TransactionType::Withdrawal).with_category(category)
    }

    #[test]
    fn test_category_breakdown_sorted_with_first_seen_colors() {
        let records = vec![
            spend("1", "20", "Food", at(2024, 6, 1)),
            spend("2", "50", "Rent", at(2024, 6, 2)),
            spend("3", "30", "Transport", at(2024, 6, 3)),
            TransactionRecord::new("4", dec("500"), at(2024, 6, 4), TransactionType::Deposit)
                .with_category("Salary"),
        ];
        let colors = palette(&["#A", "#B", "#C"]);

        let series = category_breakdown_series(&records, &colors, "Uncategorized");

        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Rent", "Transport", "Food"]);
        assert_eq!(series[0].color, "#B");
        assert_eq!(series[1].color, "#C");
        assert_eq!(series[2].color, "#A");
        assert_eq!(series[0].percentage, 50.0);
        assert_eq!(series[1].percentage, 30.0);
        assert_eq!(series[2].percentage, 20.0);
    }

    #[test]
    fn test_category_breakdown_ties_keep_first_seen() {
        let records = vec![
            spend("1", "10", "Food", at(2024, 6, 1)),
            spend("2", "10", "Games", at(2024, 6, 1)),
            spend("3", "10", "Books", at(2024, 6, 1)),
        ];

        let series = category_breakdown_series(&records, &palette(&["#A"]), "Uncategorized");
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Games", "Books"]);
        assert!(series.iter().all(|s| s.color == "#A"));
    }

    #[test]
    fn test_category_percentages_sum_to_hundred() {
        let records = vec![
            spend("1", "1", "A", at(2024, 6, 1)),
            spend("2", "1", "B", at(2024, 6, 1)),
            spend("3", "1", "C", at(2024, 6, 1)),
            spend("4", "3.5", "D", at(2024, 6, 1)),
        ];

        let series = category_breakdown_series(&records, &palette(&["#A"]), "Uncategorized");
        let sum: f64 = series.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.1 * series.len() as f64);
    }

    #[test]
    fn test_category_breakdown_empty_without_withdrawals() {
        let records = vec![
            TransactionRecord::new("1", dec("10"), at(2024, 6, 1), TransactionType::Deposit),
            spend("2", "0", "Food", at(2024, 6, 1)),
        ];
        assert!(category_breakdown_series(&records, &palette(&["#A"]), "Uncategorized").is_empty());
        assert!(category_breakdown_series(&[], &palette(&["#A"]), "Uncategorized").is_empty());
    }

    #[test]
    fn test_category_breakdown_groups_blank_category() {
        let records = vec![
            spend("1", "10", "", at(2024, 6, 1)),
            spend("2", "30", "Food", at(2024, 6, 1)),
        ];

        let series = category_breakdown_series(&records, &palette(&["#A"]), "Uncategorized");
        assert_eq!(series[1].label, "Uncategorized");
        assert_eq!(series[1].percentage, 25.0);
    }

    #[test]
    fn test_monthly_series_always_dense() {
        let window = MonthWindow::new(date(2024, 6, 15), 6);
        let colors = palette(&["#1", "#2", "#3", "#4"]);
        let records = vec![spend("1", "5", "Food", at(2019, 1, 1))];

        let series = monthly_spending_series(&records, &window, &colors);

        assert_eq!(series.len(), 6);
        let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert!(series.iter().all(|b| b.value.is_zero()));
        assert_eq!(series[4].color, "#1");
        assert_eq!(series[5].color, "#2");
    }

    #[test]
    fn test_monthly_series_empty_input() {
        let window = MonthWindow::new(date(2024, 6, 15), 6);
        assert!(monthly_spending_series(&[], &window, &palette(&["#A"])).is_empty());
    }

    #[test]
    fn test_monthly_series_excludes_deposits() {
        let window = MonthWindow::new(date(2024, 6, 15), 2);
        let records = vec![
            TransactionRecord::new("1", dec("20"), at(2024, 6, 3), TransactionType::Deposit),
            spend("2", "30", "Food", at(2024, 6, 10)),
        ];

        let series = monthly_spending_series(&records, &window, &palette(&["#A"]));

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "May");
        assert_eq!(series[0].value, Decimal::ZERO);
        assert_eq!(series[1].label, "Jun");
        assert_eq!(series[1].value, dec("30"));
    }

    #[test]
    fn test_monthly_series_window_bounds() {
        let window = MonthWindow::new(date(2024, 6, 15), 6);
        let records = vec![
            spend("1", "5", "Food", at(2024, 1, 14)),
            spend("2", "7", "Food", at(2024, 1, 15)),
            spend("3", "11", "Food", at(2023, 6, 20)),
            spend("4", "13", "Food", at(2024, 7, 1)),
            spend("5", "17", "Food", at(2024, 3, 31)),
            spend("6", "19", "Food", at(2024, 6, 28)),
        ];

        let series = monthly_spending_series(&records, &window, &palette(&["#A"]));

        assert_eq!(series[0].month, date(2024, 1, 1));
        assert_eq!(series[0].value, dec("7"));
        assert_eq!(series[2].value, dec("17"));
        assert_eq!(series[5].value, dec("19"));
        let total: Decimal = series.iter().map(|b| b.value).sum();
        assert_eq!(total, dec("43"));
    }

    #[test]
    fn test_monthly_series_spans_year_boundary() {
        let window = MonthWindow::new(date(2024, 2, 10), 3);
        let records = vec![
            spend("1", "4", "Food", at(2023, 12, 25)),
            spend("2", "6", "Food", at(2024, 1, 2)),
        ];

        let series = monthly_spending_series(&records, &window, &palette(&["#A"]));
        let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Dec", "Jan", "Feb"]);
        assert_eq!(series[0].value, dec("4"));
        assert_eq!(series[1].value, dec("6"));
    }
}
