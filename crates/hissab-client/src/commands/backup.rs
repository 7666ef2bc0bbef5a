use hissab_store::{BackupPayload, CsvImportStats, ImportStats, KeyValueStore};

use crate::error::Result;
use crate::state::Session;

pub fn export_backup<K: KeyValueStore>(session: &Session<K>) -> Result<BackupPayload> {
    let username = session.require_user()?;
    Ok(session.store().export_backup(username)?)
}

pub fn import_backup<K: KeyValueStore>(
    session: &Session<K>,
    payload: &BackupPayload,
) -> Result<ImportStats> {
    let username = session.require_user()?;
    Ok(session.store().import_backup(username, payload)?)
}

/// The logged-in user's transactions as CSV text.
pub fn export_csv<K: KeyValueStore>(session: &Session<K>) -> Result<String> {
    let username = session.require_user()?;
    Ok(session.store().export_csv(username)?)
}

pub fn import_csv<K: KeyValueStore>(session: &Session<K>, raw: &str) -> Result<CsvImportStats> {
    let username = session.require_user()?;
    let stats = session.store().import_csv(username, raw)?;
    if !stats.rejected.is_empty() {
        tracing::warn!(username, rejected = stats.rejected.len(), "CSV rows rejected");
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hissab_shared::{Transaction, TransactionKind};

    use super::*;
    use crate::commands::testing::logged_in;
    use crate::ClientError;

    #[test]
    fn test_backup_between_accounts() {
        let mut session = logged_in("alice");
        session
            .store()
            .add_transaction(
                "alice",
                &Transaction::new(
                    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    TransactionKind::Income,
                    "Gift",
                    "Birthday",
                    10_000,
                ),
            )
            .unwrap();
        let payload = export_backup(&session).unwrap();

        session.login("bob").unwrap();
        let stats = import_backup(&session, &payload).unwrap();
        assert_eq!(stats.transactions_imported, 1);
        assert_eq!(session.store().list_transactions("bob").len(), 1);
    }

    #[test]
    fn test_csv_between_accounts() {
        let mut session = logged_in("alice");
        session
            .store()
            .add_transaction(
                "alice",
                &Transaction::new(
                    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                    TransactionKind::Expense,
                    "Food",
                    "Lunch",
                    45_050,
                ),
            )
            .unwrap();
        let csv = export_csv(&session).unwrap();
        assert!(csv.contains("450.50"));

        session.login("bob").unwrap();
        let stats = import_csv(&session, &csv).unwrap();
        assert_eq!(stats.imported, 1);
        assert!(stats.rejected.is_empty());

        let again = import_csv(&session, &csv).unwrap();
        assert_eq!((again.imported, again.duplicates), (0, 1));
        assert_eq!(session.store().list_transactions("bob")[0].amount_minor_units, 45_050);
    }

    #[test]
    fn test_csv_requires_login() {
        let mut session = logged_in("alice");
        session.logout().unwrap();
        assert!(matches!(export_csv(&session), Err(ClientError::NotLoggedIn)));
        assert!(matches!(
            import_csv(&session, "Date,Type\n"),
            Err(ClientError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_corrupt_backup_is_an_error() {
        let session = logged_in("alice");
        let mut payload = export_backup(&session).unwrap();
        payload.checksum = "00".into();

        assert!(matches!(
            import_backup(&session, &payload),
            Err(ClientError::Store(_))
        ));
    }
}
