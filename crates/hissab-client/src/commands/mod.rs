//! Command handlers called by front ends.
//!
//! Each sub-module groups related commands by domain. Commands take the
//! [`Session`](crate::Session) explicitly; those touching per-user data fail
//! with [`ClientError::NotLoggedIn`](crate::ClientError::NotLoggedIn) when
//! nobody is logged in.

pub mod analytics;
pub mod backup;
pub mod budgets;
pub mod identity;
pub mod settings;
pub mod transactions;

use hissab_shared::amount::format_major;
use hissab_shared::constants::MAX_AMOUNT_MINOR_UNITS;
use hissab_shared::MinorUnits;

use crate::error::{ClientError, Result};

fn require_amount(what: &str, amount: MinorUnits) -> Result<()> {
    if amount <= 0 {
        return Err(ClientError::Validation(format!("{what} must be greater than zero")));
    }
    if amount > MAX_AMOUNT_MINOR_UNITS {
        return Err(ClientError::Validation(format!(
            "{what} must not exceed {}",
            format_major(MAX_AMOUNT_MINOR_UNITS)
        )));
    }
    Ok(())
}

fn require_non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}
