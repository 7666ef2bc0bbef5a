//! CRUD operations for [`Transaction`] records.
//!
//! The list keeps insertion order; it is not sorted by date.

use hissab_shared::{Transaction, TransactionPatch};

use crate::error::Result;
use crate::keys;
use crate::kv::KeyValueStore;
use crate::store::RecordStore;

impl<K: KeyValueStore> RecordStore<K> {
    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn list_transactions(&self, username: &str) -> Vec<Transaction> {
        self.load(&keys::transactions(username))
    }

    pub fn get_transaction(&self, username: &str, id: &str) -> Option<Transaction> {
        self.list_transactions(username)
            .into_iter()
            .find(|t| t.id == id)
    }

    // ------------------------------------------------------------------
    // Write
    // ------------------------------------------------------------------

    pub fn save_transactions(&self, username: &str, transactions: &[Transaction]) -> Result<()> {
        self.save(&keys::transactions(username), transactions)
    }

    /// Append a transaction to the end of the list.
    pub fn add_transaction(&self, username: &str, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.list_transactions(username);
        transactions.push(transaction.clone());
        self.save_transactions(username, &transactions)?;
        tracing::debug!(username, id = %transaction.id, "transaction added");
        Ok(())
    }

    /// Apply `patch` to the transaction with `id`. Returns `false` (and
    /// writes nothing) when no such transaction exists.
    pub fn update_transaction(
        &self,
        username: &str,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<bool> {
        let mut transactions = self.list_transactions(username);
        let Some(existing) = transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };

        existing.apply(patch);
        self.save_transactions(username, &transactions)?;
        tracing::debug!(username, id, "transaction updated");
        Ok(true)
    }

    /// Delete the transaction with `id`. Returns `true` if one was removed.
    pub fn delete_transaction(&self, username: &str, id: &str) -> Result<bool> {
        let mut transactions = self.list_transactions(username);
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        if transactions.len() == before {
            return Ok(false);
        }

        self.save_transactions(username, &transactions)?;
        tracing::debug!(username, id, "transaction deleted");
        Ok(true)
    }

    pub fn clear_transactions(&self, username: &str) -> Result<()> {
        self.remove(&keys::transactions(username))?;
        tracing::debug!(username, "transactions cleared");
        Ok(())
    }
}
