//! Monthly report: the month's totals, its transactions and how every budget
//! performed.

use chrono::NaiveDate;
use hissab_shared::{Budget, MinorUnits, Transaction};
use serde::{Deserialize, Serialize};

use crate::budget::{budget_usage, BudgetStatus};
use crate::range::same_month;
use crate::totals::Totals;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPerformance {
    pub category: String,
    pub budgeted: MinorUnits,
    pub spent: MinorUnits,
    pub remaining: MinorUnits,
    pub utilization_percent: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub generated_at: String,
    /// `YYYY-MM`
    pub month: String,
    pub summary: Totals,
    /// The month's transactions, oldest first.
    pub transactions: Vec<Transaction>,
    pub budget_performance: Vec<BudgetPerformance>,
}

pub fn monthly_report(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
    generated_at: impl Into<String>,
) -> MonthlyReport {
    let mut month_transactions: Vec<Transaction> = transactions
        .iter()
        .filter(|t| same_month(t.date, today))
        .cloned()
        .collect();
    month_transactions.sort_by_key(|t| t.date);

    let budget_performance = budgets
        .iter()
        .map(|budget| {
            let usage = budget_usage(budget, transactions, today);
            BudgetPerformance {
                remaining: usage.remaining_this_month(),
                category: usage.category,
                budgeted: usage.monthly_limit,
                spent: usage.spent_this_month,
                utilization_percent: usage.monthly_percentage,
                status: usage.status,
            }
        })
        .collect();

    MonthlyReport {
        generated_at: generated_at.into(),
        month: today.format("%Y-%m").to_string(),
        summary: Totals::from_transactions(&month_transactions),
        transactions: month_transactions,
        budget_performance,
    }
}
