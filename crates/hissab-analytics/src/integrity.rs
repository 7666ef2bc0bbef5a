//! Consistency checks over stored collections. Reports only, never repairs.

use std::collections::HashSet;

use hissab_shared::constants::MAX_AMOUNT_MINOR_UNITS;
use hissab_shared::{Budget, MinorUnits, Transaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IntegrityIssue {
    DuplicateTransactionId { id: String },
    NonPositiveAmount { id: String, amount: MinorUnits },
    AmountTooLarge { id: String, amount: MinorUnits },
    DuplicateBudget { category: String },
    NonPositiveMonthlyLimit { category: String, limit: MinorUnits },
    NonPositiveYearlyLimit { category: String, limit: MinorUnits },
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTransactionId { id } => {
                write!(f, "transaction id {id} appears more than once")
            }
            Self::NonPositiveAmount { id, amount } => {
                write!(f, "transaction {id} has non-positive amount {amount}")
            }
            Self::AmountTooLarge { id, amount } => {
                write!(f, "transaction {id} has amount {amount} above the maximum")
            }
            Self::DuplicateBudget { category } => write!(f, "more than one budget for {category}"),
            Self::NonPositiveMonthlyLimit { category, limit } => {
                write!(f, "budget {category} has non-positive monthly limit {limit}")
            }
            Self::NonPositiveYearlyLimit { category, limit } => {
                write!(f, "budget {category} has non-positive yearly limit {limit}")
            }
        }
    }
}

pub fn check_integrity(transactions: &[Transaction], budgets: &[Budget]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    let mut seen_ids = HashSet::new();
    let mut reported_ids = HashSet::new();
    for t in transactions {
        if !seen_ids.insert(t.id.as_str()) && reported_ids.insert(t.id.as_str()) {
            issues.push(IntegrityIssue::DuplicateTransactionId { id: t.id.clone() });
        }
        if t.amount_minor_units <= 0 {
            issues.push(IntegrityIssue::NonPositiveAmount {
                id: t.id.clone(),
                amount: t.amount_minor_units,
            });
        } else if t.amount_minor_units > MAX_AMOUNT_MINOR_UNITS {
            issues.push(IntegrityIssue::AmountTooLarge {
                id: t.id.clone(),
                amount: t.amount_minor_units,
            });
        }
    }

    let mut seen_categories = HashSet::new();
    for b in budgets {
        if !seen_categories.insert(b.category.as_str()) {
            issues.push(IntegrityIssue::DuplicateBudget {
                category: b.category.clone(),
            });
        }
        if b.monthly_limit_minor_units <= 0 {
            issues.push(IntegrityIssue::NonPositiveMonthlyLimit {
                category: b.category.clone(),
                limit: b.monthly_limit_minor_units,
            });
        }
        if let Some(limit) = b.yearly_limit_minor_units.filter(|l| *l <= 0) {
            issues.push(IntegrityIssue::NonPositiveYearlyLimit {
                category: b.category.clone(),
                limit,
            });
        }
    }

    issues
}
