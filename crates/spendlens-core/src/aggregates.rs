//! Scalar aggregators over a transaction list
//!
//! Every function here is a pure reducer: it borrows the records, never
//! mutates them, and has a defined result for an empty list. Rankings break
//! ties in favour of the label that appears first in the input.

use std::collections::HashMap;
use std::ops::AddAssign;

use rust_decimal::Decimal;
use spendlens_config::NOT_AVAILABLE;

use crate::models::TransactionRecord;
use crate::reports::HighestSpending;

/// Sum values per label, keeping labels in first-seen order
pub(crate) fn group_in_order<'a, V, I>(entries: I) -> Vec<(&'a str, V)>
where
    V: AddAssign + Default,
    I: IntoIterator<Item = (&'a str, V)>,
{
    let mut groups: Vec<(&'a str, V)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for (label, value) in entries {
        match index.get(label) {
            Some(&i) => groups[i].1 += value,
            None => {
                index.insert(label, groups.len());
                groups.push((label, value));
            }
        }
    }

    groups
}

/// Largest group; the earliest group wins a tie
fn first_max<'a, V: Ord + Copy>(groups: &[(&'a str, V)]) -> Option<(&'a str, V)> {
    let mut best: Option<(&'a str, V)> = None;
    for &(label, value) in groups {
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((label, value)),
        }
    }
    best
}

fn withdrawals(records: &[TransactionRecord]) -> impl Iterator<Item = &TransactionRecord> {
    records.iter().filter(|r| r.is_withdrawal())
}

/// Sum of deposit amounts
pub fn total_income(records: &[TransactionRecord]) -> Decimal {
    records
        .iter()
        .filter(|r| r.is_deposit())
        .map(|r| r.amount)
        .sum()
}

/// Sum of withdrawal amounts
pub fn total_spending(records: &[TransactionRecord]) -> Decimal {
    withdrawals(records).map(|r| r.amount).sum()
}

/// Income minus spending; negative when spending exceeds income
pub fn net_savings(records: &[TransactionRecord]) -> Decimal {
    total_income(records) - total_spending(records)
}

/// Mean withdrawal amount, zero when there are no withdrawals
pub fn average_withdrawal(records: &[TransactionRecord]) -> Decimal {
    let (count, total) = withdrawals(records)
        .fold((0usize, Decimal::ZERO), |(count, total), r| (count + 1, total + r.amount));

    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Category with the most records of any type
pub fn most_frequent_category(records: &[TransactionRecord], uncategorized: &str) -> String {
    let counts = group_in_order(records.iter().map(|r| (r.category_or(uncategorized), 1usize)));
    first_max(&counts)
        .map(|(label, _)| label.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Category with the largest withdrawal total
pub fn highest_spending_category(records: &[TransactionRecord], uncategorized: &str) -> HighestSpending {
    let sums = group_in_order(withdrawals(records).map(|r| (r.category_or(uncategorized), r.amount)));
    match first_max(&sums) {
        Some((label, amount)) => HighestSpending {
            category: label.to_string(),
            amount,
        },
        None => HighestSpending::not_available(),
    }
}

/// Payment method used by the most records of any type
pub fn most_used_payment_method(records: &[TransactionRecord], unknown: &str) -> String {
    let counts = group_in_order(records.iter().map(|r| (r.payment_method_or(unknown), 1usize)));
    first_max(&counts)
        .map(|(label, _)| label.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Record with the latest date; the earliest in input order wins a tie
pub fn latest_transaction(records: &[TransactionRecord]) -> Option<&TransactionRecord> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if current.date >= record.date => Some(current),
        _ => Some(record),
    })
}

/// Up to `count` records, newest first; equal dates keep input order
///
/// This orders by date rather than taking the first `count` rows as fetched,
/// so the list stays correct when the source returns rows unsorted.
pub fn recent_transactions(records: &[TransactionRecord], count: usize) -> Vec<TransactionRecord> {
    let mut sorted: Vec<&TransactionRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(count).cloned().collect()
}
