use std::collections::HashSet;

use hissab_shared::{amount, Budget, Transaction, UserSettings};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::store::RecordStore;

/// Full per-user backup: settings, transactions and budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPayload {
    /// RFC-3339 timestamp of when the backup was created
    pub created_at: String,
    /// App version that produced the backup
    pub version: String,
    pub settings: UserSettings,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    /// BLAKE3 hex digest over the three data sections.
    pub checksum: String,
}

impl BackupPayload {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Whether `checksum` matches the payload's data sections.
    pub fn verify(&self) -> Result<bool> {
        let expected = checksum(&self.settings, &self.transactions, &self.budgets)?;
        Ok(expected == self.checksum)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub transactions_imported: usize,
    pub transactions_skipped: usize,
    pub budgets_imported: usize,
    pub budgets_skipped: usize,
}

impl<K: KeyValueStore> RecordStore<K> {
    /// Snapshot everything stored for `username`.
    pub fn export_backup(&self, username: &str) -> Result<BackupPayload> {
        let settings = self.get_settings(username);
        let transactions = self.list_transactions(username);
        let budgets = self.list_budgets(username);
        let checksum = checksum(&settings, &transactions, &budgets)?;

        tracing::info!(
            username,
            transactions = transactions.len(),
            budgets = budgets.len(),
            "backup exported"
        );

        Ok(BackupPayload {
            created_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings,
            transactions,
            budgets,
            checksum,
        })
    }

    /// Merge a backup into the data stored for `username`.
    ///
    /// Transactions whose id already exists and budgets whose category
    /// already exists are skipped, as are records whose amounts fall outside
    /// `1..=MAX_AMOUNT_MINOR_UNITS`. Stored settings are left as they are.
    pub fn import_backup(&self, username: &str, payload: &BackupPayload) -> Result<ImportStats> {
        if !payload.verify()? {
            return Err(StoreError::Corrupt("checksum mismatch".into()));
        }

        let mut stats = ImportStats::default();

        let mut transactions = self.list_transactions(username);
        let mut known_ids: HashSet<String> = transactions.iter().map(|t| t.id.clone()).collect();
        for tx in &payload.transactions {
            if !amount::in_range(tx.amount_minor_units) {
                tracing::warn!(username, id = %tx.id, "skipping transaction with bad amount");
                stats.transactions_skipped += 1;
            } else if known_ids.insert(tx.id.clone()) {
                transactions.push(tx.clone());
                stats.transactions_imported += 1;
            } else {
                stats.transactions_skipped += 1;
            }
        }
        if stats.transactions_imported > 0 {
            self.save_transactions(username, &transactions)?;
        }

        let mut budgets = self.list_budgets(username);
        for budget in &payload.budgets {
            let limits_ok = amount::in_range(budget.monthly_limit_minor_units)
                && budget.yearly_limit_minor_units.map_or(true, amount::in_range);
            if !limits_ok || budgets.iter().any(|b| b.category == budget.category) {
                stats.budgets_skipped += 1;
            } else {
                budgets.push(budget.clone());
                stats.budgets_imported += 1;
            }
        }
        if stats.budgets_imported > 0 {
            self.save_budgets(username, &budgets)?;
        }

        tracing::info!(username, ?stats, "backup imported");
        Ok(stats)
    }
}

fn checksum(
    settings: &UserSettings,
    transactions: &[Transaction],
    budgets: &[Budget],
) -> Result<String> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(serde_json::to_string(settings)?.as_bytes());
    hasher.update(serde_json::to_string(transactions)?.as_bytes());
    hasher.update(serde_json::to_string(budgets)?.as_bytes());
    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hissab_shared::TransactionKind;

    use super::*;
    use crate::kv::MemoryStore;

    fn seeded() -> RecordStore<MemoryStore> {
        let store = RecordStore::new(MemoryStore::new());
        for (id, amount) in [("t1", 1_000), ("t2", 2_000)] {
            store
                .add_transaction(
                    "alice",
                    &Transaction {
                        id: id.into(),
                        date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                        kind: TransactionKind::Expense,
                        category: "Food".into(),
                        description: String::new(),
                        amount_minor_units: amount,
                    },
                )
                .unwrap();
        }
        store.upsert_budget("alice", &Budget::monthly("Food", 50_000)).unwrap();
        store
    }

    #[test]
    fn test_export_import_into_fresh_user() {
        let store = seeded();
        let payload = store.export_backup("alice").unwrap();
        let raw = payload.to_json_pretty().unwrap();

        let parsed = BackupPayload::from_json(&raw).unwrap();
        let stats = store.import_backup("bob", &parsed).unwrap();

        assert_eq!(stats.transactions_imported, 2);
        assert_eq!(stats.budgets_imported, 1);
        assert_eq!(store.list_transactions("bob"), store.list_transactions("alice"));
    }

    #[test]
    fn test_import_skips_existing_records() {
        let store = seeded();
        let payload = store.export_backup("alice").unwrap();

        let stats = store.import_backup("alice", &payload).unwrap();
        assert_eq!(
            stats,
            ImportStats {
                transactions_imported: 0,
                transactions_skipped: 2,
                budgets_imported: 0,
                budgets_skipped: 1,
            }
        );
        assert_eq!(store.list_transactions("alice").len(), 2);
    }

    #[test]
    fn test_import_skips_out_of_range_amounts() {
        let source = RecordStore::new(MemoryStore::new());
        let huge = i64::MAX / 2 + 1;
        let transactions: Vec<Transaction> = [("big1", huge), ("big2", huge), ("ok", 500)]
            .into_iter()
            .map(|(id, amount)| Transaction {
                id: id.into(),
                date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                kind: TransactionKind::Income,
                category: "Gift".into(),
                description: String::new(),
                amount_minor_units: amount,
            })
            .collect();
        source.save_transactions("alice", &transactions).unwrap();
        source
            .save_budgets("alice", &[Budget::monthly("Food", 0)])
            .unwrap();
        let payload = source.export_backup("alice").unwrap();

        let target = RecordStore::new(MemoryStore::new());
        let stats = target.import_backup("bob", &payload).unwrap();
        assert_eq!(stats.transactions_imported, 1);
        assert_eq!(stats.transactions_skipped, 2);
        assert_eq!(stats.budgets_skipped, 1);
        assert_eq!(target.list_transactions("bob")[0].id, "ok");
    }

    #[test]
    fn test_tampered_backup_rejected() {
        let store = seeded();
        let mut payload = store.export_backup("alice").unwrap();
        payload.transactions[0].amount_minor_units = 1;

        let err = store.import_backup("bob", &payload).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
        assert!(store.list_transactions("bob").is_empty());
    }
}
