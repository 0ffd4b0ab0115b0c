//! Display formatting for amounts, rates and counts.
//!
//! Amounts follow Indonesian dashboard convention: "M" is miliar
//! (10^9) and "Jt" is juta (10^6).

use crate::types::{Rupiah, BILLION, MILLION, TRILLION};

pub const NOT_APPLICABLE: &str = "N/A";

/// Amount in miliar, e.g. `Rp 12.35 M`.
pub fn rupiah_billions(amount: Rupiah, decimals: usize) -> String {
    format!("Rp {:.*} M", decimals, amount as f64 / BILLION as f64)
}

/// Amount in triliun with no decimals, e.g. `Rp 15 T`.
pub fn rupiah_trillions(amount: Rupiah) -> String {
    format!("Rp {:.0} T", amount as f64 / TRILLION as f64)
}

/// Amount in juta, e.g. `Rp 45.0 Jt`.
pub fn rupiah_millions(amount: f64) -> String {
    format!("Rp {:.1} Jt", amount / MILLION as f64)
}

/// Signed change in miliar without the currency prefix, e.g. `-1.20 M`.
pub fn billions_delta(delta: f64) -> String {
    format!("{:.2} M", delta / BILLION as f64)
}

/// Convert an amount to miliar for chart axes.
pub fn to_billions(amount: f64) -> f64 {
    amount / BILLION as f64
}

pub fn percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Integer with comma thousands separators, e.g. `3,200`.
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render an optional value, or "N/A".
pub fn or_na<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map(render).unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billions_and_millions() {
        assert_eq!(rupiah_billions(12_346_000_000, 2), "Rp 12.35 M");
        assert_eq!(rupiah_billions(850 * BILLION, 1), "Rp 850.0 M");
        assert_eq!(rupiah_millions(45_000_000.0), "Rp 45.0 Jt");
        assert_eq!(rupiah_trillions(15 * TRILLION), "Rp 15 T");
        assert_eq!(billions_delta(-1_200_000_000.0), "-1.20 M");
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(3_200), "3,200");
        assert_eq!(thousands(1_234_567), "1,234,567");
        assert_eq!(thousands(-45_000), "-45,000");
    }

    #[test]
    fn missing_values_render_na() {
        assert_eq!(or_na(None::<f64>, |v| percent(v, 1)), "N/A");
        assert_eq!(or_na(Some(12.345), |v| percent(v, 1)), "12.3%");
    }
}
