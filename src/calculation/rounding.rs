//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to two decimal places, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use tax_calculator::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(round_money(dec("2499.954")), dec("2499.95"));
/// assert_eq!(round_money(dec("0.025")), dec("0.03"));
/// assert_eq!(round_money(dec("-0.025")), dec("-0.03"));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rounds_down_below_midpoint() {
        assert_eq!(round_money(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn test_rounds_up_at_midpoint() {
        assert_eq!(round_money(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn test_preserves_already_rounded_values() {
        assert_eq!(round_money(dec!(32499.75)), dec!(32499.75));
    }

    #[test]
    fn test_carries_into_integer_part() {
        assert_eq!(round_money(dec!(999999.999)), dec!(1000000.00));
    }
}
