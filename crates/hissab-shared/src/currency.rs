//! Static currency table: ISO code to display name and symbol.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn c(code: &'static str, name: &'static str, symbol: &'static str) -> Currency {
    Currency { code, name, symbol }
}

pub const CURRENCIES: &[Currency] = &[
    c("USD", "United States Dollar", "$"),
    c("EUR", "Euro", "€"),
    c("GBP", "British Pound", "£"),
    c("PKR", "Pakistani Rupee", "₨"),
    c("INR", "Indian Rupee", "₹"),
    c("JPY", "Japanese Yen", "¥"),
    c("CAD", "Canadian Dollar", "C$"),
    c("AUD", "Australian Dollar", "A$"),
    c("CNY", "Chinese Yuan", "¥"),
    c("RUB", "Russian Ruble", "₽"),
    c("AED", "UAE Dirham", "د.إ"),
    c("AFN", "Afghan Afghani", "؋"),
    c("ALL", "Albanian Lek", "L"),
    c("AMD", "Armenian Dram", "֏"),
    c("ARS", "Argentine Peso", "$"),
    c("BDT", "Bangladeshi Taka", "৳"),
    c("BRL", "Brazilian Real", "R$"),
    c("CHF", "Swiss Franc", "Fr"),
    c("COP", "Colombian Peso", "$"),
    c("CZK", "Czech Koruna", "Kč"),
    c("DKK", "Danish Krone", "kr"),
    c("EGP", "Egyptian Pound", "E£"),
    c("HKD", "Hong Kong Dollar", "HK$"),
    c("IDR", "Indonesian Rupiah", "Rp"),
    c("ILS", "Israeli New Shekel", "₪"),
    c("KRW", "South Korean Won", "₩"),
    c("KWD", "Kuwaiti Dinar", "KD"),
    c("LKR", "Sri Lankan Rupee", "Rs"),
    c("MXN", "Mexican Peso", "$"),
    c("MYR", "Malaysian Ringgit", "RM"),
    c("NGN", "Nigerian Naira", "₦"),
    c("NOK", "Norwegian Krone", "kr"),
    c("NZD", "New Zealand Dollar", "NZ$"),
    c("PHP", "Philippine Peso", "₱"),
    c("PLN", "Polish Złoty", "zł"),
    c("QAR", "Qatari Riyal", "QR"),
    c("SAR", "Saudi Riyal", "SR"),
    c("SEK", "Swedish Krona", "kr"),
    c("SGD", "Singapore Dollar", "S$"),
    c("THB", "Thai Baht", "฿"),
    c("TRY", "Turkish Lira", "₺"),
    c("TWD", "New Taiwan Dollar", "NT$"),
    c("UAH", "Ukrainian Hryvnia", "₴"),
    c("VND", "Vietnamese Đồng", "₫"),
    c("ZAR", "South African Rand", "R"),
];

/// Look up a currency by code, case-insensitively.
pub fn lookup(code: &str) -> Option<&'static Currency> {
    CURRENCIES
        .iter()
        .find(|currency| currency.code.eq_ignore_ascii_case(code.trim()))
}

impl Currency {
    /// Label shown in pickers, e.g. `Euro (EUR)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// Every currency, sorted by label for display.
pub fn options() -> Vec<&'static Currency> {
    let mut all: Vec<_> = CURRENCIES.iter().collect();
    all.sort_by_key(|currency| currency.label());
    all
}
