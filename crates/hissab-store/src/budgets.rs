use hissab_shared::Budget;

use crate::error::Result;
use crate::keys;
use crate::kv::KeyValueStore;
use crate::store::RecordStore;

impl<K: KeyValueStore> RecordStore<K> {
    pub fn list_budgets(&self, username: &str) -> Vec<Budget> {
        self.load(&keys::budgets(username))
    }

    pub fn save_budgets(&self, username: &str, budgets: &[Budget]) -> Result<()> {
        self.save(&keys::budgets(username), budgets)
    }

    /// Replace the budget for the same category in place, or append.
    pub fn upsert_budget(&self, username: &str, budget: &Budget) -> Result<()> {
        let mut budgets = self.list_budgets(username);
        match budgets.iter_mut().find(|b| b.category == budget.category) {
            Some(existing) => *existing = budget.clone(),
            None => budgets.push(budget.clone()),
        }
        self.save_budgets(username, &budgets)?;
        tracing::debug!(username, category = %budget.category, "budget saved");
        Ok(())
    }

    /// Delete the budget for `category`. Returns `true` if one was removed.
    pub fn delete_budget(&self, username: &str, category: &str) -> Result<bool> {
        let mut budgets = self.list_budgets(username);
        let before = budgets.len();
        budgets.retain(|b| b.category != category);
        if budgets.len() == before {
            return Ok(false);
        }

        self.save_budgets(username, &budgets)?;
        tracing::debug!(username, category, "budget deleted");
        Ok(true)
    }

    pub fn clear_budgets(&self, username: &str) -> Result<()> {
        self.remove(&keys::budgets(username))
    }
}
