//! Month-over-month view of spending, income and savings.

use chrono::NaiveDate;
use hissab_shared::{MinorUnits, Transaction, TransactionKind};
use serde::{Deserialize, Serialize};

use crate::breakdown::{category_breakdown, CategoryShare};
use crate::range::{days_in_month, months_before, same_month};
use crate::totals::Totals;

/// Months covered by the savings trend, current month included.
pub const SAVINGS_TREND_MONTHS: u32 = 3;

/// Income and expense totals of the month containing `month`.
pub fn month_totals(transactions: &[Transaction], month: NaiveDate) -> Totals {
    Totals::from_transactions(transactions.iter().filter(|t| same_month(t.date, month)))
}

/// `net / income * 100`, or `None` without income.
pub fn savings_rate(totals: &Totals) -> Option<f64> {
    (totals.income > 0).then(|| totals.net as f64 * 100.0 / totals.income as f64)
}

/// Relative change from `previous` to `current` in percent, or `None` when
/// there is nothing to compare against.
pub fn change_percent(current: MinorUnits, previous: MinorUnits) -> Option<f64> {
    (previous > 0).then(|| (current as f64 - previous as f64) * 100.0 / previous as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// `YYYY-MM`.
    pub month: String,
    pub income: MinorUnits,
    pub expense: MinorUnits,
    pub savings: MinorUnits,
    pub savings_rate: Option<f64>,
}

impl MonthSummary {
    pub fn of(transactions: &[Transaction], month: NaiveDate) -> Self {
        let totals = month_totals(transactions, month);
        Self {
            month: month.format("%Y-%m").to_string(),
            income: totals.income,
            expense: totals.expense,
            savings: totals.net,
            savings_rate: savings_rate(&totals),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparison {
    pub current: MonthSummary,
    pub previous: MonthSummary,
    pub expense_change_percent: Option<f64>,
    pub income_change_percent: Option<f64>,
    /// Current-month expenses per category, largest first.
    pub spending_by_category: Vec<CategoryShare>,
    /// Current-month income per source, largest first.
    pub income_by_source: Vec<CategoryShare>,
    /// Current-month expense spread over every day of the month.
    pub average_daily_expense: MinorUnits,
    /// Newest month first.
    pub savings_trend: Vec<MonthSummary>,
}

/// Compare the month containing `today` with the one before it.
pub fn month_comparison(transactions: &[Transaction], today: NaiveDate) -> MonthComparison {
    let current = MonthSummary::of(transactions, today);
    let previous = MonthSummary::of(transactions, months_before(today, 1));

    let of_kind = |kind: TransactionKind| -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| t.kind == kind && same_month(t.date, today))
            .cloned()
            .collect()
    };

    let savings_trend = (0..SAVINGS_TREND_MONTHS)
        .map(|n| MonthSummary::of(transactions, months_before(today, n)))
        .collect();

    MonthComparison {
        expense_change_percent: change_percent(current.expense, previous.expense),
        income_change_percent: change_percent(current.income, previous.income),
        spending_by_category: category_breakdown(&of_kind(TransactionKind::Expense)),
        income_by_source: category_breakdown(&of_kind(TransactionKind::Income)),
        average_daily_expense: current.expense / days_in_month(today),
        savings_trend,
        current,
        previous,
    }
}
