use chrono::NaiveDate;
use hissab_shared::{Transaction, TransactionKind};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn income(id: &str, on: NaiveDate, category: &str, amount: i64) -> Transaction {
    tx(id, on, TransactionKind::Income, category, amount)
}

pub fn expense(id: &str, on: NaiveDate, category: &str, amount: i64) -> Transaction {
    tx(id, on, TransactionKind::Expense, category, amount)
}

fn tx(id: &str, on: NaiveDate, kind: TransactionKind, category: &str, amount: i64) -> Transaction {
    Transaction {
        id: id.into(),
        date: on,
        kind,
        category: category.into(),
        description: format!("{category} {id}"),
        amount_minor_units: amount,
    }
}
