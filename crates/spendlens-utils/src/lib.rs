//! Display formatting helpers

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use spendlens_config::{CurrencyConfig, SymbolPosition};

/// Group a string of digits with a thousands separator
pub fn format_number(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format an amount with the configured symbol, grouping and precision
///
/// Rounds half away from zero, so `2.005` shows as `2.01`.
pub fn format_amount(amount: Decimal, currency: &CurrencyConfig) -> String {
    let places = currency.decimal_places;
    let rounded = amount
        .abs()
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.*}", places as usize, rounded);

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut number = format_number(int_part, &currency.thousands_separator);
    if let Some(frac) = frac_part {
        number.push_str(&currency.decimal_separator);
        number.push_str(frac);
    }

    let body = match currency.symbol_position {
        SymbolPosition::Before => format!("{}{}", currency.symbol, number),
        SymbolPosition::After => format!("{} {}", number, currency.symbol),
    };

    if amount.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format an outgoing amount with a leading minus
///
/// Amounts that round to zero get no sign.
pub fn format_outflow(amount: Decimal, currency: &CurrencyConfig) -> String {
    let body = format_amount(amount.abs(), currency);
    let rounded = amount
        .abs()
        .round_dp_with_strategy(currency.decimal_places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        body
    } else {
        format!("-{}", body)
    }
}

/// Format a percentage share with one decimal
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a timestamp as e.g. "Jun 5, 2024"
pub fn format_display_date(date: &NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}
