use hissab_shared::{MinorUnits, Transaction};
use serde::{Deserialize, Serialize};

/// Income and expense sums, in minor units.
///
/// Sums saturate at the `MinorUnits` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub income: MinorUnits,
    pub expense: MinorUnits,
    /// `income - expense`
    pub net: MinorUnits,
}

impl Totals {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expense) = transactions.into_iter().fold((0 as MinorUnits, 0 as MinorUnits), |(inc, exp), t| {
            if t.is_income() {
                (inc.saturating_add(t.amount_minor_units), exp)
            } else {
                (inc, exp.saturating_add(t.amount_minor_units))
            }
        });

        Self {
            income,
            expense,
            net: income.saturating_sub(expense),
        }
    }

    /// Income plus expense; the denominator of category percentages.
    pub fn volume(&self) -> MinorUnits {
        self.income.saturating_add(self.expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, expense, income};

    #[test]
    fn test_salary_and_food() {
        let txs = vec![
            income("1", date(2024, 1, 1), "Salary", 500_000),
            expense("2", date(2024, 1, 2), "Food", 120_000),
        ];

        let totals = Totals::from_transactions(&txs);
        assert_eq!(totals.income, 500_000);
        assert_eq!(totals.expense, 120_000);
        assert_eq!(totals.net, 380_000);
    }

    #[test]
    fn test_net_is_exact_difference() {
        let txs: Vec<_> = (0..50)
            .map(|i| {
                if i % 3 == 0 {
                    income(&i.to_string(), date(2024, 1, 1), "Gift", 1_001 * i)
                } else {
                    expense(&i.to_string(), date(2024, 1, 1), "Food", 997 * i)
                }
            })
            .collect();

        let totals = Totals::from_transactions(&txs);
        assert_eq!(totals.income - totals.expense, totals.net);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let half = i64::MAX / 2 + 1;
        let txs = vec![
            income("1", date(2024, 1, 1), "Salary", half),
            income("2", date(2024, 1, 2), "Salary", half),
            expense("3", date(2024, 1, 3), "Food", half),
        ];

        let totals = Totals::from_transactions(&txs);
        assert_eq!(totals.income, i64::MAX);
        assert_eq!(totals.expense, half);
        assert_eq!(totals.net, i64::MAX - half);
        assert_eq!(totals.volume(), i64::MAX);
    }

    #[test]
    fn test_empty() {
        let none: Vec<Transaction> = Vec::new();
        assert_eq!(Totals::from_transactions(&none), Totals::default());
    }
}
