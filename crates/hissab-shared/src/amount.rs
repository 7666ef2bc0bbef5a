//! Parsing and plain rendering of major-unit amounts.

use crate::constants::{MAX_AMOUNT_MINOR_UNITS, MINOR_UNITS_PER_MAJOR};
use crate::error::AmountError;
use crate::types::MinorUnits;

/// Whether `amount` is acceptable for a transaction or budget limit.
pub fn in_range(amount: MinorUnits) -> bool {
    amount > 0 && amount <= MAX_AMOUNT_MINOR_UNITS
}

/// Parse a non-negative major-unit amount such as `1,250.5` into minor
/// units. At most two decimals; amounts above
/// [`MAX_AMOUNT_MINOR_UNITS`] are rejected.
pub fn parse_major(raw: &str) -> Result<MinorUnits, AmountError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let (whole, fraction) = cleaned.split_once('.').unwrap_or((&cleaned, ""));

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !digits_only(whole)
        || !digits_only(fraction)
        || fraction.len() > 2
    {
        return Err(AmountError::Invalid(raw.to_string()));
    }

    let whole: MinorUnits = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| AmountError::TooLarge(raw.to_string()))?
    };
    let cents: MinorUnits = format!("{fraction:0<2}")
        .parse()
        .map_err(|_| AmountError::Invalid(raw.to_string()))?;

    whole
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .and_then(|v| v.checked_add(cents))
        .filter(|v| *v <= MAX_AMOUNT_MINOR_UNITS)
        .ok_or_else(|| AmountError::TooLarge(raw.to_string()))
}

/// Render minor units as a bare decimal, e.g. `1234.50`.
pub fn format_major(amount: MinorUnits) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let per = MINOR_UNITS_PER_MAJOR.unsigned_abs();
    format!("{sign}{}.{:02}", abs / per, abs % per)
}
