//! Plain CSV export and import of a user's transactions.
//!
//! Columns: `Date,Type,Category/Source,Description,Amount`, with amounts in
//! major units (`1234.50`). Unlike a backup, a CSV file carries no ids and no
//! checksum: duplicates are detected by content and bad rows are reported
//! and skipped rather than failing the whole import.

use std::collections::HashSet;

use chrono::NaiveDate;
use hissab_shared::amount::{self, format_major};
use hissab_shared::{MinorUnits, Transaction, TransactionKind};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::store::RecordStore;

pub const CSV_HEADERS: [&str; 5] = ["Date", "Type", "Category/Source", "Description", "Amount"];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Category/Source")]
    category: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Amount")]
    amount: String,
}

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRejection {
    /// 1-based line in the input, the header being line 1.
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CsvImportStats {
    pub imported: usize,
    pub duplicates: usize,
    pub rejected: Vec<CsvRejection>,
}

type Fingerprint = (NaiveDate, TransactionKind, String, String, MinorUnits);

fn fingerprint(tx: &Transaction) -> Fingerprint {
    (
        tx.date,
        tx.kind,
        tx.category.clone(),
        tx.description.clone(),
        tx.amount_minor_units,
    )
}

fn parse_row(row: &CsvRow) -> std::result::Result<Transaction, String> {
    let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
        .map_err(|_| format!("invalid date '{}'", row.date))?;
    let kind: TransactionKind = row.kind.parse()?;
    if row.category.is_empty() {
        return Err("empty category".into());
    }
    let amount = amount::parse_major(&row.amount).map_err(|e| e.to_string())?;
    if !amount::in_range(amount) {
        return Err(format!("amount out of range '{}'", row.amount));
    }

    Ok(Transaction::new(date, kind, &row.category, &row.description, amount))
}

impl<K: KeyValueStore> RecordStore<K> {
    /// Every transaction of `username` as CSV text, in stored order. The
    /// header row is written even when there are no transactions.
    pub fn export_csv(&self, username: &str) -> Result<String> {
        let transactions = self.list_transactions(username);

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;
        for tx in &transactions {
            writer.serialize(CsvRow {
                date: tx.date.format(DATE_FORMAT).to_string(),
                kind: tx.kind.to_string(),
                category: tx.category.clone(),
                description: tx.description.clone(),
                amount: format_major(tx.amount_minor_units),
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))?;
        tracing::info!(username, count = transactions.len(), "transactions exported as CSV");
        String::from_utf8(bytes).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// Append the rows of `raw` to the transactions of `username`.
    ///
    /// Fails only when a required column is missing. Rows that fail to parse
    /// are listed in [`CsvImportStats::rejected`]; rows identical in date,
    /// type, category, description and amount to an existing transaction (or
    /// an earlier row) count as duplicates. Each imported row gets a fresh id.
    pub fn import_csv(&self, username: &str, raw: &str) -> Result<CsvImportStats> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(raw.as_bytes());

        let headers = reader.headers()?.clone();
        let missing: Vec<&str> = CSV_HEADERS
            .iter()
            .copied()
            .filter(|h| !headers.iter().any(|found| found == *h))
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::Corrupt(format!(
                "CSV is missing columns: {}",
                missing.join(", ")
            )));
        }

        let mut transactions = self.list_transactions(username);
        let mut seen: HashSet<Fingerprint> = transactions.iter().map(fingerprint).collect();
        let mut stats = CsvImportStats::default();

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map_or(0, |p| p.line());
                    stats.rejected.push(CsvRejection {
                        line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let line = record.position().map_or(0, |p| p.line());
            let parsed = record
                .deserialize::<CsvRow>(Some(&headers))
                .map_err(|e| e.to_string())
                .and_then(|row| parse_row(&row));

            match parsed {
                Ok(tx) if seen.insert(fingerprint(&tx)) => {
                    transactions.push(tx);
                    stats.imported += 1;
                }
                Ok(_) => stats.duplicates += 1,
                Err(reason) => stats.rejected.push(CsvRejection { line, reason }),
            }
        }

        if stats.imported > 0 {
            self.save_transactions(username, &transactions)?;
        }
        tracing::info!(
            username,
            imported = stats.imported,
            duplicates = stats.duplicates,
            rejected = stats.rejected.len(),
            "CSV imported"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    type Row<'a> = (&'a str, TransactionKind, &'a str, &'a str, MinorUnits);

    fn store_with(txs: &[Row<'_>]) -> RecordStore<MemoryStore> {
        let store = RecordStore::new(MemoryStore::new());
        for (date, kind, category, description, amount) in txs {
            let date = NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap();
            store
                .add_transaction(
                    "alice",
                    &Transaction::new(date, *kind, *category, *description, *amount),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_export_layout() {
        let store = store_with(&[
            ("2024-06-01", TransactionKind::Income, "Salary", "June", 5_000_000),
            ("2024-06-02", TransactionKind::Expense, "Food", "Dinner, with friends", 3_850),
        ]);

        let csv = store.export_csv("alice").unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Type,Category/Source,Description,Amount");
        assert_eq!(lines[1], "2024-06-01,income,Salary,June,50000.00");
        assert_eq!(lines[2], "2024-06-02,expense,Food,\"Dinner, with friends\",38.50");
    }

    #[test]
    fn test_export_empty_has_header() {
        let store = RecordStore::new(MemoryStore::new());
        assert_eq!(
            store.export_csv("alice").unwrap().trim_end(),
            "Date,Type,Category/Source,Description,Amount"
        );
    }

    #[test]
    fn test_import_into_other_user() {
        let store = store_with(&[
            ("2024-06-01", TransactionKind::Income, "Salary", "June", 5_000_000),
            ("2024-06-02", TransactionKind::Expense, "Food", "Dinner, with friends", 3_850),
        ]);
        let csv = store.export_csv("alice").unwrap();

        let stats = store.import_csv("bob", &csv).unwrap();
        assert_eq!(stats.imported, 2);
        assert!(stats.rejected.is_empty());

        let bob = store.list_transactions("bob");
        let alice = store.list_transactions("alice");
        assert_eq!(fingerprint(&bob[1]), fingerprint(&alice[1]));
        assert_ne!(bob[0].id, alice[0].id);
    }

    #[test]
    fn test_import_skips_duplicates_and_bad_rows() {
        let store = store_with(&[(
            "2024-06-01",
            TransactionKind::Expense,
            "Food",
            "Lunch",
            1_200,
        )]);
        let raw = "\
Date,Type,Category/Source,Description,Amount
2024-06-01,expense,Food,Lunch,12.00
2024-06-03,Income,Gift,Birthday,50
2024-06-03,income,Gift,Birthday,50.00
2024-13-01,expense,Food,Bad date,1
2024-06-04,transfer,Food,Bad type,1
2024-06-04,expense,Food,Zero,0
2024-06-04,expense,Food,Negative,-3
2024-06-04,expense,,No category,3
";

        let stats = store.import_csv("alice", raw).unwrap();
        assert_eq!(stats.imported, 1);
        assert_eq!(stats.duplicates, 2);
        let lines: Vec<u64> = stats.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![5, 6, 7, 8, 9]);

        let stored = store.list_transactions("alice");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].kind, TransactionKind::Income);
        assert_eq!(stored[1].amount_minor_units, 5_000);
    }

    #[test]
    fn test_import_requires_headers() {
        let store = RecordStore::new(MemoryStore::new());
        let err = store
            .import_csv("alice", "Date,Type,Amount\n2024-06-01,expense,5\n")
            .unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(msg) if msg.contains("Category/Source")));
        assert!(store.list_transactions("alice").is_empty());
    }

    #[test]
    fn test_import_rejects_huge_amount() {
        let store = RecordStore::new(MemoryStore::new());
        let raw = "Date,Type,Category/Source,Description,Amount\n\
                   2024-06-01,income,Gift,Windfall,92233720368547758.07\n";
        let stats = store.import_csv("alice", raw).unwrap();
        assert_eq!(stats.imported, 0);
        assert_eq!(stats.rejected.len(), 1);
    }
}
