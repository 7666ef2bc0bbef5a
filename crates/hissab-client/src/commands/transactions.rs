use chrono::NaiveDate;
use hissab_analytics::search;
use hissab_shared::{MinorUnits, Transaction, TransactionKind, TransactionPatch};
use hissab_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{require_non_empty, require_amount};
use crate::error::Result;
use crate::state::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub amount_minor_units: MinorUnits,
}

pub fn record_transaction<K: KeyValueStore>(
    session: &Session<K>,
    new: NewTransaction,
) -> Result<Transaction> {
    let username = session.require_user()?;
    require_non_empty("Category", &new.category)?;
    require_amount("Amount", new.amount_minor_units)?;

    let tx = Transaction::new(
        new.date,
        new.kind,
        new.category.trim(),
        new.description.trim(),
        new.amount_minor_units,
    );
    session.store().add_transaction(username, &tx)?;
    info!(username, id = %tx.id, kind = %tx.kind, "transaction recorded");
    Ok(tx)
}

/// Returns `false` when no transaction has `id`.
pub fn edit_transaction<K: KeyValueStore>(
    session: &Session<K>,
    id: &str,
    patch: &TransactionPatch,
) -> Result<bool> {
    let username = session.require_user()?;
    if let Some(amount) = patch.amount_minor_units {
        require_amount("Amount", amount)?;
    }
    if let Some(ref category) = patch.category {
        require_non_empty("Category", category)?;
    }

    Ok(session.store().update_transaction(username, id, patch)?)
}

pub fn remove_transaction<K: KeyValueStore>(session: &Session<K>, id: &str) -> Result<bool> {
    let username = session.require_user()?;
    Ok(session.store().delete_transaction(username, id)?)
}

/// Transactions matching `query`, newest first. An empty query lists all.
pub fn find_transactions<K: KeyValueStore>(
    session: &Session<K>,
    query: &str,
) -> Result<Vec<Transaction>> {
    let username = session.require_user()?;
    Ok(search(&session.store().list_transactions(username), query))
}

pub fn clear_transactions<K: KeyValueStore>(session: &Session<K>) -> Result<()> {
    let username = session.require_user()?;
    session.store().clear_transactions(username)?;
    info!(username, "all transactions cleared");
    Ok(())
}
