use std::collections::HashMap;

use hissab_shared::{MinorUnits, Transaction, TransactionKind};
use serde::{Deserialize, Serialize};

use crate::totals::Totals;

/// Sum of one `(category, kind)` group and its share of total volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: MinorUnits,
    /// `amount / (income + expense) * 100`, or 0 when there is no volume.
    pub percentage: f64,
}

/// Group by `(category, kind)`, largest group first.
///
/// A category used for both income and expense yields two groups. Groups
/// with equal sums keep the order in which they first appeared.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut index: HashMap<(&str, TransactionKind), usize> = HashMap::new();
    let mut groups: Vec<CategoryShare> = Vec::new();

    for t in transactions {
        let slot = *index
            .entry((t.category.as_str(), t.kind))
            .or_insert_with(|| {
                groups.push(CategoryShare {
                    category: t.category.clone(),
                    kind: t.kind,
                    amount: 0,
                    percentage: 0.0,
                });
                groups.len() - 1
            });
        groups[slot].amount = groups[slot].amount.saturating_add(t.amount_minor_units);
    }

    let volume = Totals::from_transactions(transactions).volume();
    for group in &mut groups {
        group.percentage = if volume > 0 {
            group.amount as f64 / volume as f64 * 100.0
        } else {
            0.0
        };
    }

    groups.sort_by(|a, b| b.amount.cmp(&a.amount));
    groups
}
