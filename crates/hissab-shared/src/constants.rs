/// Application name
pub const APP_NAME: &str = "Hissab";

/// Default currency code for a fresh user
pub const DEFAULT_CURRENCY: &str = "INR";

/// Symbol matching [`DEFAULT_CURRENCY`]
pub const DEFAULT_SYMBOL: &str = "₹";

/// Minor units per major unit (paisa per rupee, cents per dollar)
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest amount a single transaction or budget limit may carry
/// (one trillion major units). Keeps sums over realistic ledgers far from
/// the `i64` bounds.
pub const MAX_AMOUNT_MINOR_UNITS: i64 = 100_000_000_000_000;

/// Budget utilisation at or above this percentage is a warning
pub const BUDGET_WARNING_PERCENT: f64 = 80.0;

/// Budget utilisation at or above this percentage is over budget
pub const BUDGET_OVER_PERCENT: f64 = 100.0;

/// Category of the income record synthesised during onboarding
pub const INITIAL_BALANCE_CATEGORY: &str = "Initial Balance";

/// Description of the income record synthesised during onboarding
pub const INITIAL_BALANCE_DESCRIPTION: &str = "Starting Balance";

/// Shortest password accepted by the signup and reset flows
pub const MIN_PASSWORD_LEN: usize = 4;

/// Number of transactions shown on the dashboard by default
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Categories offered when recording an expense
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];

/// Sources offered when recording an income
pub const INCOME_SOURCES: [&str; 6] = [
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Gift",
    "Other",
];
