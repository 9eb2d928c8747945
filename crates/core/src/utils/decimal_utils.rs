use rust_decimal::Decimal;

use crate::constants::{PERCENTAGE_PRECISION, QUANTITY_THRESHOLD};

/// Returns true when a quantity is large enough to count as an open position.
pub fn is_quantity_significant(quantity: &Decimal) -> bool {
    let threshold =
        Decimal::from_str_radix(QUANTITY_THRESHOLD, 10).unwrap_or_else(|_| Decimal::new(1, 8));
    quantity.abs() >= threshold
}

/// `numerator / denominator` rounded to percentage precision, as a fraction
/// (0.0945 for 9.45%). `None` when the denominator is zero or the quotient
/// is out of range.
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    numerator
        .checked_div(denominator)
        .map(|quotient| quotient.round_dp(PERCENTAGE_PRECISION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn dust_is_not_significant() {
        assert!(!is_quantity_significant(&dec!(0.000000001)));
        assert!(is_quantity_significant(&dec!(0.00000001)));
        assert!(is_quantity_significant(&dec!(-2)));
    }

    #[test]
    fn ratio_rounds_and_guards_zero() {
        assert_eq!(ratio(dec!(57), dec!(603)), Some(dec!(0.0945)));
        assert_eq!(ratio(dec!(5), dec!(0)), None);
        assert_eq!(ratio(Decimal::MAX, dec!(0.5)), None);
    }
}
