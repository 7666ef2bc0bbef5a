use chrono::NaiveDate;
use hissab_shared::MinorUnits;

/// Render minor units as `<symbol><major>` with thousands separators and two
/// decimals, e.g. `₹1,234.50`. Negative amounts put the sign first.
pub fn format_amount(amount: MinorUnits, symbol: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let major = abs / 100;
    let minor = abs % 100;
    format!("{sign}{symbol}{}.{minor:02}", group_thousands(major))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Chart label for a date, e.g. `Jan 5`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0, "₹"), "₹0.00");
        assert_eq!(format_amount(5, "$"), "$0.05");
        assert_eq!(format_amount(123_450, "₹"), "₹1,234.50");
        assert_eq!(format_amount(100_000_000, "€"), "€1,000,000.00");
        assert_eq!(format_amount(-380_000, "₹"), "-₹3,800.00");
    }

    #[test]
    fn test_short_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(short_date(d), "Jan 5");
    }
}
