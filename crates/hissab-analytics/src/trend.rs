use std::collections::BTreeMap;

use chrono::NaiveDate;
use hissab_shared::{to_major, MinorUnits, Transaction};
use serde::{Deserialize, Serialize};

use crate::format::short_date;

// ---------------------------------------------------------------------------
// Balance trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub label: String,
    pub balance_minor_units: MinorUnits,
    /// `balance_minor_units` in major units, for charting.
    pub balance: f64,
}

/// Running balance after each transaction, oldest first.
///
/// The balance starts at zero at the beginning of the slice: it describes the
/// movement within the window, not the all-time account balance. Transactions
/// sharing a date keep their input order.
pub fn balance_trend(transactions: &[Transaction]) -> Vec<TrendPoint> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| t.date);

    let mut running: MinorUnits = 0;
    ordered
        .into_iter()
        .map(|t| {
            running = running.saturating_add(t.signed_amount());
            TrendPoint {
                date: t.date,
                label: short_date(t.date),
                balance_minor_units: running,
                balance: to_major(running),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Cash flow
// ---------------------------------------------------------------------------

/// Income and expense booked on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowBucket {
    pub date: NaiveDate,
    pub label: String,
    pub income_minor_units: MinorUnits,
    pub expense_minor_units: MinorUnits,
    pub income: f64,
    pub expense: f64,
}

/// One bucket per calendar date that has transactions, oldest first.
pub fn cash_flow(transactions: &[Transaction]) -> Vec<CashFlowBucket> {
    let mut by_date: BTreeMap<NaiveDate, (MinorUnits, MinorUnits)> = BTreeMap::new();
    for t in transactions {
        let (income, expense) = by_date.entry(t.date).or_default();
        if t.is_income() {
            *income = income.saturating_add(t.amount_minor_units);
        } else {
            *expense = expense.saturating_add(t.amount_minor_units);
        }
    }

    by_date
        .into_iter()
        .map(|(date, (income, expense))| CashFlowBucket {
            date,
            label: short_date(date),
            income_minor_units: income,
            expense_minor_units: expense,
            income: to_major(income),
            expense: to_major(expense),
        })
        .collect()
}
