//! Financial health score: a 0-100 rating of the current month.
//!
//! Four factors contribute points:
//!
//! | factor             | max | awarded                                           |
//! |--------------------|-----|---------------------------------------------------|
//! | savings rate       | 30  | 30 at 20% or more, 15 at 10% or more              |
//! | budget adherence   | 25  | 25 within budget, 15 within 110%, 5 beyond        |
//! | income vs expenses | 25  | 25 when income exceeds expenses, 10 when equal    |
//! | debt management    | 20  | 20 when savings are not negative, 5 otherwise     |
//!
//! Without budgets (or with budgets that sum to zero) adherence scores 10.

use chrono::NaiveDate;
use hissab_shared::{Budget, MinorUnits, Transaction};
use serde::{Deserialize, Serialize};

use crate::comparison::{month_totals, savings_rate};
use crate::range::same_month;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthFactorKind {
    SavingsRate,
    BudgetAdherence,
    IncomeVsExpenses,
    DebtManagement,
}

impl HealthFactorKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SavingsRate => "Savings Rate",
            Self::BudgetAdherence => "Budget Adherence",
            Self::IncomeVsExpenses => "Income vs Expenses",
            Self::DebtManagement => "Debt Management",
        }
    }

    pub fn max_points(&self) -> u8 {
        match self {
            Self::SavingsRate => 30,
            Self::BudgetAdherence | Self::IncomeVsExpenses => 25,
            Self::DebtManagement => 20,
        }
    }
}

impl std::fmt::Display for HealthFactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFactor {
    pub kind: HealthFactorKind,
    pub points: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthRating {
    NeedsAttention,
    Fair,
    Good,
}

impl HealthRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=49 => Self::NeedsAttention,
            50..=74 => Self::Fair,
            _ => Self::Good,
        }
    }

    pub fn advice(&self) -> &'static [&'static str] {
        match self {
            Self::NeedsAttention => &[
                "Focus on increasing income or drastically cutting expenses.",
                "Review your budget and identify areas for significant savings.",
            ],
            Self::Fair => &[
                "Look for opportunities to increase your savings rate.",
                "Ensure you are consistently adhering to your budget.",
            ],
            Self::Good => {
                &["Keep up the great work! Consider setting more aggressive financial goals."]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    /// `YYYY-MM` of the scored month.
    pub month: String,
    pub score: u8,
    pub rating: HealthRating,
    pub factors: Vec<HealthFactor>,
    pub savings_rate: Option<f64>,
}

/// Score the month containing `today`.
pub fn health_score(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> HealthScore {
    let totals = month_totals(transactions, today);
    let rate = savings_rate(&totals);

    let savings_points = match rate {
        Some(r) if r >= 20.0 => 30,
        Some(r) if r >= 10.0 => 15,
        _ => 0,
    };

    let income_points = match totals.income.cmp(&totals.expense) {
        std::cmp::Ordering::Greater => 25,
        std::cmp::Ordering::Equal => 10,
        std::cmp::Ordering::Less => 0,
    };

    let debt_points = if totals.net >= 0 { 20 } else { 5 };

    let factors = vec![
        HealthFactor { kind: HealthFactorKind::SavingsRate, points: savings_points },
        HealthFactor {
            kind: HealthFactorKind::BudgetAdherence,
            points: adherence_points(transactions, budgets, today),
        },
        HealthFactor { kind: HealthFactorKind::IncomeVsExpenses, points: income_points },
        HealthFactor { kind: HealthFactorKind::DebtManagement, points: debt_points },
    ];
    let score = factors.iter().map(|f| f.points).sum();

    HealthScore {
        month: today.format("%Y-%m").to_string(),
        score,
        rating: HealthRating::from_score(score),
        factors,
        savings_rate: rate,
    }
}

fn adherence_points(transactions: &[Transaction], budgets: &[Budget], today: NaiveDate) -> u8 {
    let budgeted: MinorUnits = budgets
        .iter()
        .fold(0, |acc: MinorUnits, b| acc.saturating_add(b.monthly_limit_minor_units));
    if budgeted <= 0 {
        return 10;
    }

    let spent: MinorUnits = transactions
        .iter()
        .filter(|t| !t.is_income() && same_month(t.date, today))
        .filter(|t| budgets.iter().any(|b| b.category == t.category))
        .fold(0, |acc: MinorUnits, t| acc.saturating_add(t.amount_minor_units));

    // 10% leeway, compared as `spent * 10 <= budgeted * 11`.
    if spent <= budgeted {
        25
    } else if i128::from(spent) * 10 <= i128::from(budgeted) * 11 {
        15
    } else {
        5
    }
}
