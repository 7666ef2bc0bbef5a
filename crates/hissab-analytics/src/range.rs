use chrono::{Datelike, Months, NaiveDate};
use hissab_shared::Transaction;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day of `today`'s month through `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            start: today.with_day(1).unwrap_or(today),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Transactions dated inside the window, in their original order.
    /// An inverted window (`start > end`) keeps nothing.
    pub fn filter(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.contains(t.date))
            .cloned()
            .collect()
    }
}

/// Same calendar month and year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn same_year(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year()
}

/// First day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `n` months before `date`'s month.
pub fn months_before(date: NaiveDate, n: u32) -> NaiveDate {
    let start = month_start(date);
    start.checked_sub_months(Months::new(n)).unwrap_or(start)
}

/// Number of days in `date`'s month.
pub fn days_in_month(date: NaiveDate) -> i64 {
    let start = month_start(date);
    match start.checked_add_months(Months::new(1)) {
        Some(next) => (next - start).num_days(),
        None => 31,
    }
}
