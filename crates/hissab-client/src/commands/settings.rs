//! Currency choice, onboarding and data resets.

use chrono::NaiveDate;
use hissab_shared::constants::{INITIAL_BALANCE_CATEGORY, INITIAL_BALANCE_DESCRIPTION};
use hissab_shared::currency::{self, Currency};
use hissab_shared::{MinorUnits, SettingsPatch, Transaction, TransactionKind, UserSettings};
use hissab_store::KeyValueStore;
use tracing::info;

use super::require_amount;
use crate::error::{ClientError, Result};
use crate::state::Session;

pub fn get_settings<K: KeyValueStore>(session: &Session<K>) -> UserSettings {
    session.settings().clone()
}

/// Switch to `code`, taking the symbol from the currency table so the two
/// stay consistent.
pub fn choose_currency<K: KeyValueStore>(
    session: &mut Session<K>,
    code: &str,
) -> Result<&'static Currency> {
    session.require_user()?;
    let currency =
        currency::lookup(code).ok_or_else(|| ClientError::UnknownCurrency(code.to_string()))?;

    session.update_settings(SettingsPatch {
        currency: Some(currency.code.to_string()),
        symbol: Some(currency.symbol.to_string()),
        setup_complete: None,
    })?;
    Ok(currency)
}

/// Final onboarding step: record the starting balance as an income (when
/// positive) and mark setup complete.
pub fn record_opening_balance<K: KeyValueStore>(
    session: &mut Session<K>,
    amount: MinorUnits,
    today: NaiveDate,
) -> Result<Option<Transaction>> {
    let username = session.require_user()?.to_string();

    let opening = if amount > 0 {
        require_amount("Opening balance", amount)?;
        let tx = Transaction::new(
            today,
            TransactionKind::Income,
            INITIAL_BALANCE_CATEGORY,
            INITIAL_BALANCE_DESCRIPTION,
            amount,
        );
        session.store().add_transaction(&username, &tx)?;
        Some(tx)
    } else {
        None
    };

    session.update_settings(SettingsPatch {
        setup_complete: Some(true),
        ..Default::default()
    })?;
    info!(username = %username, opening = amount, "onboarding complete");
    Ok(opening)
}

/// Wipe the user's transactions, budgets and settings, then log out. The
/// account itself survives.
pub fn factory_reset<K: KeyValueStore>(session: &mut Session<K>) -> Result<()> {
    let username = session.require_user()?.to_string();
    session.store().factory_reset(&username)?;
    session.logout()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::logged_in;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    #[test]
    fn test_choose_currency_sets_symbol() {
        let mut session = logged_in("alice");
        choose_currency(&mut session, "gbp").unwrap();

        assert_eq!(session.settings().currency, "GBP");
        assert_eq!(session.settings().symbol, "£");
        assert_eq!(session.store().get_settings("alice").symbol, "£");
    }

    #[test]
    fn test_unknown_currency_leaves_settings() {
        let mut session = logged_in("alice");
        let err = choose_currency(&mut session, "XYZ").unwrap_err();
        assert!(matches!(err, ClientError::UnknownCurrency(_)));
        assert_eq!(get_settings(&session), UserSettings::default());
    }

    #[test]
    fn test_opening_balance() {
        let mut session = logged_in("alice");
        let tx = record_opening_balance(&mut session, 2_500_000, today())
            .unwrap()
            .unwrap();

        assert_eq!(tx.category, "Initial Balance");
        assert!(tx.is_income());
        assert_eq!(tx.date, today());
        assert!(session.settings().setup_complete);
        assert_eq!(session.store().list_transactions("alice"), vec![tx]);
    }

    #[test]
    fn test_zero_opening_balance_still_completes_setup() {
        let mut session = logged_in("alice");
        assert!(record_opening_balance(&mut session, 0, today())
            .unwrap()
            .is_none());
        assert!(session.settings().setup_complete);
        assert!(session.store().list_transactions("alice").is_empty());
    }

    #[test]
    fn test_factory_reset_logs_out() {
        let mut session = logged_in("alice");
        choose_currency(&mut session, "EUR").unwrap();
        record_opening_balance(&mut session, 100, today()).unwrap();

        factory_reset(&mut session).unwrap();

        assert!(!session.is_authenticated());
        assert!(session.store().list_transactions("alice").is_empty());
        assert_eq!(session.store().get_settings("alice"), UserSettings::default());
    }
}
