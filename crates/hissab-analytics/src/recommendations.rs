//! Rule-based advice for the current month, plus the daily check.

use chrono::{Datelike, NaiveDate};
use hissab_shared::{Budget, MinorUnits, Transaction, TransactionKind};
use serde::{Deserialize, Serialize};

use crate::comparison::{month_totals, savings_rate};
use crate::format::format_amount;
use crate::range::{days_in_month, months_before, same_month};

/// Months that must all carry income for income to count as regular.
pub const INCOME_CONSISTENCY_MONTHS: u32 = 3;

/// An expense above this share of monthly income is flagged as large.
const LARGE_TRANSACTION_PERCENT: i128 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Recommendation {
    #[serde(rename_all = "camelCase")]
    Overspent {
        category: String,
        over_by: MinorUnits,
        /// Suggested cut, capped at 100.
        cut_percent: f64,
    },
    #[serde(rename_all = "camelCase")]
    NearingLimit {
        category: String,
        remaining: MinorUnits,
        limit: MinorUnits,
    },
    #[serde(rename_all = "camelCase")]
    UnbudgetedSpending { category: String, spent: MinorUnits },
    LowSavingsRate { rate: f64 },
    StrongSavingsRate { rate: f64 },
    RecordIncome,
    IrregularIncome { months: u32 },
    NoBudgets,
}

impl Recommendation {
    /// Human-readable text, amounts rendered with `symbol`.
    pub fn describe(&self, symbol: &str) -> String {
        match self {
            Self::Overspent { category, over_by, cut_percent } => format!(
                "Consider reducing spending in {category}. You've overspent by {}. \
                 Try to cut down by {cut_percent:.0}%.",
                format_amount(*over_by, symbol)
            ),
            Self::NearingLimit { category, remaining, limit } => format!(
                "You are nearing your budget limit for {category}. \
                 You have {} remaining out of {}.",
                format_amount(*remaining, symbol),
                format_amount(*limit, symbol)
            ),
            Self::UnbudgetedSpending { category, spent } => format!(
                "You have significant spending in {category} ({}) but no budget set. \
                 Consider setting a budget for this category.",
                format_amount(*spent, symbol)
            ),
            Self::LowSavingsRate { .. } => "Your savings rate is low. Try the 50/30/20 rule \
                 (50% needs, 30% wants, 20% savings) to boost your savings."
                .into(),
            Self::StrongSavingsRate { .. } => "Excellent savings rate! Keep up the great work \
                 and consider increasing your savings goals."
                .into(),
            Self::RecordIncome => "Record your income to get a clear picture of your savings \
                 rate and receive more tailored advice."
                .into(),
            Self::IrregularIncome { months } => format!(
                "Your income appears to be irregular. Building a {months}-month emergency \
                 fund is highly recommended."
            ),
            Self::NoBudgets => "You haven't set any budgets. Setting budgets helps you \
                 control spending and find room to save."
                .into(),
        }
    }
}

/// True when each of the last `months` months, the current one included,
/// has at least one income transaction.
pub fn is_income_consistent(transactions: &[Transaction], today: NaiveDate, months: u32) -> bool {
    (0..months).all(|n| {
        let month = months_before(today, n);
        transactions
            .iter()
            .any(|t| t.is_income() && same_month(t.date, month))
    })
}

/// Current-month expense per category, in first-seen order.
fn spending_by_category(transactions: &[Transaction], today: NaiveDate) -> Vec<(&str, MinorUnits)> {
    let mut spent: Vec<(&str, MinorUnits)> = Vec::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && same_month(t.date, today))
    {
        match spent.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum = sum.saturating_add(t.amount_minor_units),
            None => spent.push((t.category.as_str(), t.amount_minor_units)),
        }
    }
    spent
}

/// Advice for the month containing `today`.
///
/// Per category: overspent when spending exceeds the monthly limit, nearing
/// the limit above 80% of it, and unbudgeted when a category without a budget
/// takes more than 10% of income. Then one savings-rate note, an irregular
/// income warning and a prompt to create budgets when none exist.
pub fn recommendations(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> Vec<Recommendation> {
    let totals = month_totals(transactions, today);
    let mut out = Vec::new();

    for (category, spent) in spending_by_category(transactions, today) {
        match budgets.iter().find(|b| b.category == category) {
            Some(budget) => {
                let limit = budget.monthly_limit_minor_units;
                if spent > limit {
                    let over_by = spent.saturating_sub(limit);
                    let cut_percent = if limit > 0 {
                        (over_by as f64 * 100.0 / limit as f64).min(100.0)
                    } else {
                        100.0
                    };
                    out.push(Recommendation::Overspent {
                        category: category.to_string(),
                        over_by,
                        cut_percent,
                    });
                } else if i128::from(spent) * 10 > i128::from(limit) * 8 {
                    out.push(Recommendation::NearingLimit {
                        category: category.to_string(),
                        remaining: limit - spent,
                        limit,
                    });
                }
            }
            None if totals.income > 0 && i128::from(spent) * 10 > i128::from(totals.income) => {
                out.push(Recommendation::UnbudgetedSpending {
                    category: category.to_string(),
                    spent,
                });
            }
            None => {}
        }
    }

    match savings_rate(&totals) {
        Some(rate) if rate < 10.0 => out.push(Recommendation::LowSavingsRate { rate }),
        Some(rate) if rate >= 20.0 => out.push(Recommendation::StrongSavingsRate { rate }),
        Some(_) => {}
        None => out.push(Recommendation::RecordIncome),
    }

    if !is_income_consistent(transactions, today, INCOME_CONSISTENCY_MONTHS) {
        out.push(Recommendation::IrregularIncome { months: INCOME_CONSISTENCY_MONTHS });
    }

    if budgets.is_empty() && totals.expense > 0 {
        out.push(Recommendation::NoBudgets);
    }

    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCheck {
    pub date: NaiveDate,
    pub spent_today: MinorUnits,
    /// Unspent monthly budget spread over the rest of the month, today
    /// included. `None` without budgets; negative once over budget.
    pub remaining_daily_budget: Option<MinorUnits>,
    /// Current-month expenses above 20% of the month's income.
    pub large_transactions: Vec<Transaction>,
}

/// Snapshot of `today`: what was spent, what is left per day and which
/// expenses this month stand out.
pub fn daily_check(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> DailyCheck {
    let totals = month_totals(transactions, today);

    let spent_today = transactions
        .iter()
        .filter(|t| !t.is_income() && t.date == today)
        .fold(0, |acc: MinorUnits, t| acc.saturating_add(t.amount_minor_units));

    let budgeted = budgets
        .iter()
        .fold(0, |acc: MinorUnits, b| acc.saturating_add(b.monthly_limit_minor_units));
    let days_left = days_in_month(today) - i64::from(today.day()) + 1;
    let remaining_daily_budget = (budgeted > 0).then(|| {
        let left = budgeted.saturating_sub(totals.expense);
        if left > 0 { left / days_left } else { left }
    });

    let large_transactions = transactions
        .iter()
        .filter(|t| !t.is_income() && same_month(t.date, today) && totals.income > 0)
        .filter(|t| {
            i128::from(t.amount_minor_units) * 100
                > i128::from(totals.income) * LARGE_TRANSACTION_PERCENT
        })
        .cloned()
        .collect();

    DailyCheck { date: today, spent_today, remaining_daily_budget, large_transactions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, expense, income};

    fn budget(category: &str, limit: MinorUnits) -> Budget {
        Budget {
            category: category.into(),
            monthly_limit_minor_units: limit,
            yearly_limit_minor_units: None,
        }
    }

    fn steady_income() -> Vec<Transaction> {
        vec![
            income("i4", date(2024, 4, 1), "Salary", 100_000),
            income("i5", date(2024, 5, 1), "Salary", 100_000),
            income("i6", date(2024, 6, 1), "Salary", 100_000),
        ]
    }

    #[test]
    fn test_budget_rules() {
        let today = date(2024, 6, 20);
        let mut txs = steady_income();
        txs.extend([
            expense("1", date(2024, 6, 2), "Food", 12_000),
            expense("2", date(2024, 6, 3), "Rent", 8_500),
            expense("3", date(2024, 6, 4), "Travel", 15_000),
            expense("4", date(2024, 6, 5), "Misc", 2_000),
            // Previous month spending is ignored.
            expense("5", date(2024, 5, 5), "Bills", 90_000),
        ]);
        let budgets = [budget("Food", 10_000), budget("Rent", 10_000)];

        let recs = recommendations(&txs, &budgets, today);
        assert_eq!(
            recs,
            vec![
                Recommendation::Overspent {
                    category: "Food".into(),
                    over_by: 2_000,
                    cut_percent: 20.0,
                },
                Recommendation::NearingLimit {
                    category: "Rent".into(),
                    remaining: 1_500,
                    limit: 10_000,
                },
                Recommendation::UnbudgetedSpending { category: "Travel".into(), spent: 15_000 },
                Recommendation::StrongSavingsRate { rate: 62.5 },
            ]
        );
    }

    #[test]
    fn test_cut_percent_is_capped() {
        let today = date(2024, 6, 20);
        let mut txs = steady_income();
        txs.push(expense("1", date(2024, 6, 2), "Food", 5_000));

        let recs = recommendations(&txs, &[budget("Food", 1_000)], today);
        assert!(matches!(
            &recs[0],
            Recommendation::Overspent { cut_percent, .. } if *cut_percent == 100.0
        ));

        let recs = recommendations(&txs, &[budget("Food", 0)], today);
        assert!(matches!(
            &recs[0],
            Recommendation::Overspent { over_by: 5_000, cut_percent, .. } if *cut_percent == 100.0
        ));
    }

    #[test]
    fn test_no_income_no_budgets() {
        let today = date(2024, 6, 20);
        let txs = vec![expense("1", date(2024, 6, 2), "Food", 5_000)];

        let recs = recommendations(&txs, &[], today);
        assert_eq!(
            recs,
            vec![
                Recommendation::RecordIncome,
                Recommendation::IrregularIncome { months: 3 },
                Recommendation::NoBudgets,
            ]
        );
    }

    #[test]
    fn test_low_savings_rate() {
        let today = date(2024, 6, 20);
        let mut txs = steady_income();
        txs.push(expense("1", date(2024, 6, 2), "Rent", 95_000));

        let recs = recommendations(&txs, &[budget("Rent", 100_000)], today);
        assert_eq!(
            recs,
            vec![
                Recommendation::NearingLimit {
                    category: "Rent".into(),
                    remaining: 5_000,
                    limit: 100_000,
                },
                Recommendation::LowSavingsRate { rate: 5.0 },
            ]
        );
    }

    #[test]
    fn test_is_income_consistent() {
        let today = date(2024, 6, 20);
        assert!(is_income_consistent(&steady_income(), today, 3));

        let gap: Vec<Transaction> = steady_income()
            .into_iter()
            .filter(|t| t.id != "i5")
            .collect();
        assert!(!is_income_consistent(&gap, today, 3));
        assert!(is_income_consistent(&gap, today, 1));

        // Crossing the year boundary.
        let winter = vec![
            income("1", date(2023, 11, 30), "Salary", 1),
            income("2", date(2023, 12, 1), "Salary", 1),
            income("3", date(2024, 1, 2), "Salary", 1),
        ];
        assert!(is_income_consistent(&winter, date(2024, 1, 15), 3));
    }

    #[test]
    fn test_describe_uses_symbol() {
        let rec = Recommendation::Overspent {
            category: "Food".into(),
            over_by: 2_000,
            cut_percent: 20.0,
        };
        let text = rec.describe("$");
        assert!(text.contains("Food"));
        assert!(text.contains("$20.00"));
        assert!(text.contains("20%"));
    }

    #[test]
    fn test_serialized_kind_tag() {
        let json = serde_json::to_value(Recommendation::UnbudgetedSpending {
            category: "Travel".into(),
            spent: 100,
        })
        .unwrap();
        assert_eq!(json["kind"], "unbudgeted-spending");
        assert_eq!(json["spent"], 100);
    }

    #[test]
    fn test_daily_check() {
        let today = date(2024, 6, 21);
        let txs = vec![
            income("1", date(2024, 6, 1), "Salary", 100_000),
            expense("2", date(2024, 6, 2), "Rent", 25_000),
            expense("3", date(2024, 6, 21), "Food", 1_000),
            expense("4", date(2024, 6, 21), "Food", 500),
            expense("5", date(2024, 5, 21), "Rent", 50_000),
        ];

        let check = daily_check(&txs, &[budget("Food", 30_000), budget("Rent", 30_000)], today);
        assert_eq!(check.spent_today, 1_500);
        // 60_000 - 26_500 over the 10 days from the 21st to the 30th.
        assert_eq!(check.remaining_daily_budget, Some(3_350));
        assert_eq!(check.large_transactions.len(), 1);
        assert_eq!(check.large_transactions[0].id, "2");

        let over = daily_check(&txs, &[budget("Rent", 20_000)], today);
        assert_eq!(over.remaining_daily_budget, Some(-6_500));

        assert_eq!(daily_check(&txs, &[], today).remaining_daily_budget, None);
    }
}
