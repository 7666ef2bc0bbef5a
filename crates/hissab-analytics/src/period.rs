use hissab_shared::Transaction;
use serde::{Deserialize, Serialize};

use crate::breakdown::{category_breakdown, CategoryShare};
use crate::range::DateRange;
use crate::totals::Totals;
use crate::trend::{balance_trend, cash_flow, CashFlowBucket, TrendPoint};

/// Everything the analytics view shows for one date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAnalytics {
    pub range: DateRange,
    pub transaction_count: usize,
    pub totals: Totals,
    pub breakdown: Vec<CategoryShare>,
    pub trend: Vec<TrendPoint>,
    pub cash_flow: Vec<CashFlowBucket>,
}

pub fn summarize_period(transactions: &[Transaction], range: DateRange) -> PeriodAnalytics {
    let window = range.filter(transactions);

    PeriodAnalytics {
        range,
        transaction_count: window.len(),
        totals: Totals::from_transactions(&window),
        breakdown: category_breakdown(&window),
        trend: balance_trend(&window),
        cash_flow: cash_flow(&window),
    }
}
