//! Coercion of raw form input into model values.
//!
//! Interactive entry is forgiving: anything that does not parse becomes zero
//! (or `false`) instead of an error. The pricing engine never sees raw text.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// currency sign and comma thousands separators.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    trimmed.replace(',', "")
}

/// Parses a monetary amount, treating empty or unparseable input as zero.
///
/// Accepts `"1,234.56"`, `"$40"`, and scientific notation such as `"1e2"`.
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or_else(|e| {
            debug!(input = %s, "amount coerced to zero: {}", e);
            Decimal::ZERO
        })
}

/// Parses a service count.
///
/// Leading integer digits are honored (`"3.7"` is 3, `"4 lines"` is 4).
/// Negative or non-numeric input yields zero; counts too large for `usize`
/// saturate at `usize::MAX`.
pub fn parse_count(s: &str) -> usize {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        debug!(input = %s, "count coerced to zero");
        return 0;
    }
    // only digits remain, so the sole failure is overflow
    digits.parse().unwrap_or_else(|_| {
        debug!(input = %s, "count out of range, saturated");
        usize::MAX
    })
}

/// Parses a checkbox-style flag. Only affirmative words count as checked.
pub fn parse_toggle(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "on" | "yes" | "y" | "true" | "1" | "checked"
    )
}
