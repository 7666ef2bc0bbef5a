use chrono::NaiveDate;
use hissab_shared::{MinorUnits, Transaction};
use serde::{Deserialize, Serialize};

use crate::range::same_month;
use crate::totals::Totals;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Income minus expense over every transaction ever recorded.
    pub total_balance: MinorUnits,
    pub month_income: MinorUnits,
    pub month_expense: MinorUnits,
    /// Most recent transactions, newest first.
    pub recent: Vec<Transaction>,
}

pub fn dashboard_summary(
    transactions: &[Transaction],
    today: NaiveDate,
    recent_limit: usize,
) -> DashboardSummary {
    let all_time = Totals::from_transactions(transactions);
    let this_month =
        Totals::from_transactions(transactions.iter().filter(|t| same_month(t.date, today)));

    let mut recent = newest_first(transactions.iter().cloned().collect());
    recent.truncate(recent_limit);

    DashboardSummary {
        total_balance: all_time.net,
        month_income: this_month.income,
        month_expense: this_month.expense,
        recent,
    }
}

/// Case-insensitive match on description or category, newest first.
pub fn search(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let needle = query.trim().to_lowercase();
    let hits = transactions
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.description.to_lowercase().contains(&needle)
                || t.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    newest_first(hits)
}

// Stable: same-day transactions keep their stored order.
fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}
