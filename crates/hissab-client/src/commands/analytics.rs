use chrono::NaiveDate;
use hissab_analytics::{
    check_integrity, daily_check as build_daily_check, dashboard_summary, health_score,
    month_comparison, monthly_report as build_monthly_report, recommendations, summarize_period,
    DailyCheck, DashboardSummary, DateRange, HealthScore, IntegrityIssue, MonthComparison,
    MonthlyReport, PeriodAnalytics, Recommendation,
};
use hissab_store::KeyValueStore;

use crate::error::Result;
use crate::state::Session;

pub fn period_analytics<K: KeyValueStore>(
    session: &Session<K>,
    range: DateRange,
) -> Result<PeriodAnalytics> {
    let username = session.require_user()?;
    Ok(summarize_period(
        &session.store().list_transactions(username),
        range,
    ))
}

pub fn dashboard<K: KeyValueStore>(
    session: &Session<K>,
    today: NaiveDate,
    recent_limit: usize,
) -> Result<DashboardSummary> {
    let username = session.require_user()?;
    Ok(dashboard_summary(
        &session.store().list_transactions(username),
        today,
        recent_limit,
    ))
}

pub fn monthly_report<K: KeyValueStore>(
    session: &Session<K>,
    today: NaiveDate,
) -> Result<MonthlyReport> {
    let username = session.require_user()?;
    let store = session.store();
    Ok(build_monthly_report(
        &store.list_transactions(username),
        &store.list_budgets(username),
        today,
        chrono::Utc::now().to_rfc3339(),
    ))
}

pub fn integrity_report<K: KeyValueStore>(session: &Session<K>) -> Result<Vec<IntegrityIssue>> {
    let username = session.require_user()?;
    let store = session.store();
    let issues = check_integrity(
        &store.list_transactions(username),
        &store.list_budgets(username),
    );
    if !issues.is_empty() {
        tracing::warn!(username, count = issues.len(), "integrity issues found");
    }
    Ok(issues)
}

pub fn health_report<K: KeyValueStore>(
    session: &Session<K>,
    today: NaiveDate,
) -> Result<HealthScore> {
    let username = session.require_user()?;
    let store = session.store();
    Ok(health_score(
        &store.list_transactions(username),
        &store.list_budgets(username),
        today,
    ))
}

pub fn smart_recommendations<K: KeyValueStore>(
    session: &Session<K>,
    today: NaiveDate,
) -> Result<Vec<Recommendation>> {
    let username = session.require_user()?;
    let store = session.store();
    Ok(recommendations(
        &store.list_transactions(username),
        &store.list_budgets(username),
        today,
    ))
}

pub fn daily_check<K: KeyValueStore>(session: &Session<K>, today: NaiveDate) -> Result<DailyCheck> {
    let username = session.require_user()?;
    let store = session.store();
    Ok(build_daily_check(
        &store.list_transactions(username),
        &store.list_budgets(username),
        today,
    ))
}

pub fn compare_months<K: KeyValueStore>(
    session: &Session<K>,
    today: NaiveDate,
) -> Result<MonthComparison> {
    let username = session.require_user()?;
    Ok(month_comparison(
        &session.store().list_transactions(username),
        today,
    ))
}
