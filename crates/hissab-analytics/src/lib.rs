//! # hissab-analytics
//!
//! Derived views over a user's transactions and budgets: date-range
//! filtering, income/expense totals, category breakdown, running balance
//! trend, per-day cash flow, budget utilisation, dashboard summary, the
//! monthly report, month-over-month comparison, the financial health score
//! and rule-based recommendations.
//!
//! Everything here is a pure function. Callers load the collections from the
//! store and pass them in, together with `today` wherever "current month"
//! matters, so results never depend on the wall clock.

pub mod breakdown;
pub mod budget;
pub mod comparison;
pub mod dashboard;
pub mod format;
pub mod health;
pub mod integrity;
pub mod period;
pub mod range;
pub mod recommendations;
pub mod report;
pub mod totals;
pub mod trend;

#[cfg(test)]
mod fixtures;

pub use breakdown::{category_breakdown, CategoryShare};
pub use budget::{
    budget_alerts, budget_overview, budget_usage, BudgetAlert, BudgetStatus, BudgetUsage,
};
pub use comparison::{month_comparison, MonthComparison, MonthSummary};
pub use dashboard::{dashboard_summary, search, DashboardSummary};
pub use format::{format_amount, short_date};
pub use health::{health_score, HealthFactor, HealthFactorKind, HealthRating, HealthScore};
pub use integrity::{check_integrity, IntegrityIssue};
pub use period::{summarize_period, PeriodAnalytics};
pub use range::DateRange;
pub use recommendations::{
    daily_check, is_income_consistent, recommendations, DailyCheck, Recommendation,
};
pub use report::{monthly_report, BudgetPerformance, MonthlyReport};
pub use totals::Totals;
pub use trend::{balance_trend, cash_flow, CashFlowBucket, TrendPoint};
