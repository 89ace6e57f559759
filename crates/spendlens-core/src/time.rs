//! Trailing calendar-month windows for time-bucketed series

use chrono::{Datelike, Months, NaiveDate, Utc};

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Three-letter month label, e.g. "Jan"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

fn month_ordinal(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

/// `months_back` calendar months ending with the month of `reference`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    reference: NaiveDate,
    months_back: u32,
}

impl MonthWindow {
    pub fn new(reference: NaiveDate, months_back: u32) -> Self {
        Self {
            reference,
            months_back,
        }
    }

    /// Window ending with the current month
    pub fn ending_today(months_back: u32) -> Self {
        Self::new(today(), months_back)
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn months_back(&self) -> u32 {
        self.months_back
    }

    /// First day of every month in the window, oldest first
    pub fn months(&self) -> Vec<NaiveDate> {
        let Some(current) = self.reference.with_day(1) else {
            return Vec::new();
        };
        (0..self.months_back)
            .rev()
            .filter_map(|back| current.checked_sub_months(Months::new(back)))
            .collect()
    }

    /// Earliest date counted: the reference date moved back `months_back - 1`
    /// months, clamped to the end of a shorter month
    pub fn cutoff(&self) -> Option<NaiveDate> {
        if self.months_back == 0 {
            return None;
        }
        self.reference
            .checked_sub_months(Months::new(self.months_back - 1))
    }

    /// Position of `date` in `months()`, if it is counted by this window
    pub fn bucket_index(&self, date: NaiveDate) -> Option<usize> {
        let cutoff = self.cutoff()?;
        if date < cutoff {
            return None;
        }
        let back = month_ordinal(self.reference) - month_ordinal(date);
        if back < 0 || back >= self.months_back as i64 {
            return None;
        }
        Some(self.months_back as usize - 1 - back as usize)
    }

    /// Check if a date is counted by this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.bucket_index(date).is_some()
    }

    /// Human-readable description, e.g. "Jan 2024 to Jun 2024"
    pub fn description(&self) -> String {
        let months = self.months();
        match (months.first(), months.last()) {
            (Some(first), Some(last)) => format!(
                "{} to {}",
                first.format("%b %Y"),
                last.format("%b %Y")
            ),
            _ => "Empty window".to_string(),
        }
    }
}
