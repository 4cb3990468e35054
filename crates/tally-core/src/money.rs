//! Minor-unit money formatting
//!
//! Amounts are stored as integer cents; these helpers render them without
//! going through floating point.

/// Format minor units as major units with two decimals (e.g. `-500` -> `"-5.00"`)
pub fn format_major_units(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Display symbol for a currency code, falling back to the code itself
pub fn currency_symbol(currency: &str) -> &str {
    match currency {
        "BRL" => "R$",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}

/// Format an amount with its currency symbol (e.g. `"R$ 12.34"`)
pub fn format_money(minor: i64, currency: &str) -> String {
    format!("{} {}", currency_symbol(currency), format_major_units(minor))
}

/// Convert a major-unit decimal (as typed by a user) into minor units
pub fn to_minor_units(major: f64) -> i64 {
    (major * 100.0).round() as i64
}
