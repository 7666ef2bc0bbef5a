//! Budget utilisation for the current month and year.

use chrono::NaiveDate;
use hissab_shared::constants::{BUDGET_OVER_PERCENT, BUDGET_WARNING_PERCENT};
use hissab_shared::{Budget, MinorUnits, Transaction};
use serde::{Deserialize, Serialize};

use crate::range::{same_month, same_year};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn classify(percentage: f64) -> Self {
        if percentage >= BUDGET_OVER_PERCENT {
            Self::Over
        } else if percentage >= BUDGET_WARNING_PERCENT {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub category: String,
    pub monthly_limit: MinorUnits,
    pub spent_this_month: MinorUnits,
    pub monthly_percentage: f64,
    pub status: BudgetStatus,
    pub yearly_limit: Option<MinorUnits>,
    pub spent_this_year: MinorUnits,
    /// 0 when no yearly limit is set.
    pub yearly_percentage: f64,
    pub yearly_status: Option<BudgetStatus>,
}

impl BudgetUsage {
    /// Negative once the monthly limit is exceeded.
    pub fn remaining_this_month(&self) -> MinorUnits {
        self.monthly_limit.saturating_sub(self.spent_this_month)
    }

    pub fn remaining_this_year(&self) -> Option<MinorUnits> {
        self.yearly_limit
            .map(|limit| limit.saturating_sub(self.spent_this_year))
    }
}

/// Share of `limit` consumed by `spent`. A non-positive limit counts as
/// fully consumed (100%, so `over`) once anything is spent, and 0 otherwise.
fn percentage(spent: MinorUnits, limit: MinorUnits) -> f64 {
    if limit <= 0 {
        return if spent > 0 { BUDGET_OVER_PERCENT } else { 0.0 };
    }
    spent as f64 / limit as f64 * 100.0
}

/// Utilisation of `budget` given the user's full transaction list.
///
/// Only expenses in the budget's category count; "this month" and "this
/// year" are the calendar month and year of `today`.
pub fn budget_usage(
    budget: &Budget,
    transactions: &[Transaction],
    today: NaiveDate,
) -> BudgetUsage {
    let mut spent_this_month: MinorUnits = 0;
    let mut spent_this_year: MinorUnits = 0;

    for t in transactions
        .iter()
        .filter(|t| t.is_expense() && t.category == budget.category)
    {
        if same_year(t.date, today) {
            spent_this_year = spent_this_year.saturating_add(t.amount_minor_units);
            if same_month(t.date, today) {
                spent_this_month = spent_this_month.saturating_add(t.amount_minor_units);
            }
        }
    }

    let monthly_percentage = percentage(spent_this_month, budget.monthly_limit_minor_units);
    let yearly_percentage = budget
        .yearly_limit_minor_units
        .map(|limit| percentage(spent_this_year, limit))
        .unwrap_or(0.0);

    BudgetUsage {
        category: budget.category.clone(),
        monthly_limit: budget.monthly_limit_minor_units,
        spent_this_month,
        monthly_percentage,
        status: BudgetStatus::classify(monthly_percentage),
        yearly_limit: budget.yearly_limit_minor_units,
        spent_this_year,
        yearly_percentage,
        yearly_status: budget
            .yearly_limit_minor_units
            .map(|_| BudgetStatus::classify(yearly_percentage)),
    }
}

/// Usage for every budget, in budget order.
pub fn budget_overview(
    budgets: &[Budget],
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<BudgetUsage> {
    budgets
        .iter()
        .map(|b| budget_usage(b, transactions, today))
        .collect()
}

/// A budget that needs attention this month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category: String,
    pub status: BudgetStatus,
    pub percentage: f64,
    pub spent: MinorUnits,
    pub limit: MinorUnits,
    /// How far past the limit spending went; only set when over.
    pub over_by: Option<MinorUnits>,
}

/// Budgets at warning level or over, most utilised first.
pub fn budget_alerts(usages: &[BudgetUsage]) -> Vec<BudgetAlert> {
    let mut alerts: Vec<BudgetAlert> = usages
        .iter()
        .filter(|u| u.status != BudgetStatus::OnTrack)
        .map(|u| BudgetAlert {
            category: u.category.clone(),
            status: u.status,
            percentage: u.monthly_percentage,
            spent: u.spent_this_month,
            limit: u.monthly_limit,
            over_by: (u.status == BudgetStatus::Over)
                .then(|| u.spent_this_month.saturating_sub(u.monthly_limit)),
        })
        .collect();

    alerts.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    alerts
}
