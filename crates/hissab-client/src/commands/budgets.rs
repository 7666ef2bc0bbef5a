use chrono::NaiveDate;
use hissab_analytics::{budget_alerts, budget_overview, BudgetAlert, BudgetUsage};
use hissab_shared::{Budget, MinorUnits};
use hissab_store::KeyValueStore;
use tracing::info;

use super::{require_non_empty, require_amount};
use crate::error::Result;
use crate::state::Session;

/// Create or replace the budget for `category`.
pub fn set_budget<K: KeyValueStore>(
    session: &Session<K>,
    category: &str,
    monthly_limit: MinorUnits,
    yearly_limit: Option<MinorUnits>,
) -> Result<Budget> {
    let username = session.require_user()?;
    require_non_empty("Category", category)?;
    require_amount("Monthly limit", monthly_limit)?;
    if let Some(limit) = yearly_limit {
        require_amount("Yearly limit", limit)?;
    }

    let budget = Budget {
        category: category.trim().to_string(),
        monthly_limit_minor_units: monthly_limit,
        yearly_limit_minor_units: yearly_limit,
    };
    session.store().upsert_budget(username, &budget)?;
    info!(username, category = %budget.category, "budget set");
    Ok(budget)
}

pub fn remove_budget<K: KeyValueStore>(session: &Session<K>, category: &str) -> Result<bool> {
    let username = session.require_user()?;
    Ok(session.store().delete_budget(username, category.trim())?)
}

pub fn list_budget_usage<K: KeyValueStore>(
    session: &Session<K>,
    today: NaiveDate,
) -> Result<Vec<BudgetUsage>> {
    let username = session.require_user()?;
    let store = session.store();
    Ok(budget_overview(
        &store.list_budgets(username),
        &store.list_transactions(username),
        today,
    ))
}

pub fn list_budget_alerts<K: KeyValueStore>(
    session: &Session<K>,
    today: NaiveDate,
) -> Result<Vec<BudgetAlert>> {
    Ok(budget_alerts(&list_budget_usage(session, today)?))
}
