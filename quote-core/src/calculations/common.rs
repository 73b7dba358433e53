//! Presentation helpers shared by anything that displays bill amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero. Only call this at the
/// display boundary; the pricing engine itself never rounds.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a monetary amount with exactly two fractional digits, e.g. `"86.00"`.
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Formats a percentage without trailing zeros, e.g. `"5"` or `"12.5"`.
pub fn format_percentage(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(4.004)), dec!(4.00));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(4.005)), dec!(4.01));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
    }

    // =========================================================================
    // format tests
    // =========================================================================

    #[test]
    fn format_money_pads_to_two_places() {
        assert_eq!(format_money(dec!(86)), "86.00");
        assert_eq!(format_money(dec!(4.5)), "4.50");
    }

    #[test]
    fn format_money_rounds_long_fractions() {
        // 5% of 33.33
        assert_eq!(format_money(dec!(1.6665)), "1.67");
    }

    #[test]
    fn format_money_handles_zero() {
        assert_eq!(format_money(Decimal::ZERO), "0.00");
    }

    #[test]
    fn format_percentage_drops_trailing_zeros() {
        assert_eq!(format_percentage(dec!(5.00)), "5");
        assert_eq!(format_percentage(dec!(0)), "0");
        assert_eq!(format_percentage(dec!(12.50)), "12.5");
    }
}
