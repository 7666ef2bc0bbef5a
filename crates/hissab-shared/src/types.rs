//! Domain records persisted per user.
//!
//! Every struct derives `Serialize` and `Deserialize`: the store keeps each
//! collection as one JSON blob and the UI layer receives the same shapes.
//! Monetary amounts are always integers in minor currency units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_CURRENCY, DEFAULT_SYMBOL, EXPENSE_CATEGORIES, INCOME_SOURCES, MINOR_UNITS_PER_MAJOR,
};

/// Amount in the smallest currency unit (paisa, cents).
pub type MinorUnits = i64;

/// Convert minor units to major units for display.
pub fn to_major(amount: MinorUnits) -> f64 {
    amount as f64 / MINOR_UNITS_PER_MAJOR as f64
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account. The username is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    /// Output of the password hashing capability, never the plaintext.
    pub password_digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_answer_digest: Option<String>,
    /// Avatar URI or inline `data:` image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Per-user preferences.
///
/// `symbol` is expected to match `currency` in the currency table, but nothing
/// below the flow layer enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub currency: String,
    pub symbol: String,
    pub setup_complete: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.into(),
            symbol: DEFAULT_SYMBOL.into(),
            setup_complete: false,
        }
    }
}

impl UserSettings {
    /// Merge the fields present in `patch` over `self`.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(symbol) = patch.symbol {
            self.symbol = symbol;
        }
        if let Some(setup_complete) = patch.setup_complete {
            self.setup_complete = setup_complete;
        }
    }
}

/// Partial update of [`UserSettings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub currency: Option<String>,
    pub symbol: Option<String>,
    pub setup_complete: Option<bool>,
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Categories suggested when recording a transaction of this kind.
    pub fn suggested_categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => &INCOME_SOURCES,
            Self::Expense => &EXPENSE_CATEGORIES,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// A single income or expense entry. Dates carry no time of day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub amount_minor_units: MinorUnits,
}

impl Transaction {
    /// Build a transaction with a freshly generated id.
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount_minor_units: MinorUnits,
    ) -> Self {
        Self {
            id: new_transaction_id(),
            date,
            kind,
            category: category.into(),
            description: description.into(),
            amount_minor_units,
        }
    }

    /// Signed contribution to a running balance.
    pub fn signed_amount(&self) -> MinorUnits {
        match self.kind {
            TransactionKind::Income => self.amount_minor_units,
            TransactionKind::Expense => self.amount_minor_units.saturating_neg(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Replace the fields present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: &TransactionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(ref category) = patch.category {
            self.category = category.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
        if let Some(amount) = patch.amount_minor_units {
            self.amount_minor_units = amount;
        }
    }
}

/// Partial edit of a [`Transaction`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount_minor_units: Option<MinorUnits>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.amount_minor_units.is_none()
    }
}

pub fn new_transaction_id() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

/// Spending limit for one expense category. The category is the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub category: String,
    pub monthly_limit_minor_units: MinorUnits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_limit_minor_units: Option<MinorUnits>,
}

impl Budget {
    pub fn monthly(category: impl Into<String>, limit: MinorUnits) -> Self {
        Self {
            category: category.into(),
            monthly_limit_minor_units: limit,
            yearly_limit_minor_units: None,
        }
    }

    pub fn with_yearly_limit(mut self, limit: MinorUnits) -> Self {
        self.yearly_limit_minor_units = Some(limit);
        self
    }
}
