//! Inflation adjustment: expresses a nominal cost in present-value terms.

use rust_decimal_macros::dec;

use crate::error::CreditLengthError;
use crate::time_value;
use crate::types::{Money, Percent, Years};
use crate::CreditLengthResult;

const PERCENT: rust_decimal::Decimal = dec!(100);

/// Divide a nominal cost by the compounding inflation factor over `years`.
///
/// Deflation (a negative rate) is permitted and raises the adjusted figure
/// above nominal. No rounding is applied here; callers round once when the
/// figure is stored into a result record.
pub fn adjust_for_inflation(
    nominal_cost: Money,
    annual_inflation_pct: Percent,
    years: Years,
) -> CreditLengthResult<Money> {
    if annual_inflation_pct <= dec!(-100) {
        return Err(CreditLengthError::InvalidInput {
            field: "annual_inflation_pct".into(),
            reason: "Inflation rate must be greater than -100%".into(),
        });
    }

    let factor = time_value::compound_fractional(annual_inflation_pct / PERCENT, years)?;
    Ok(nominal_cost / factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_inflation_is_noop() {
        let adjusted = adjust_for_inflation(dec!(133225.20), Decimal::ZERO, dec!(10)).unwrap();
        assert_eq!(adjusted, dec!(133225.20));
    }

    #[test]
    fn test_known_value() {
        // 1000 discounted at 3% over 10 years: 1000 / 1.03^10 ~ 744.09
        let adjusted = adjust_for_inflation(dec!(1000), dec!(3.0), dec!(10)).unwrap();
        assert!((adjusted - dec!(744.09)).abs() < dec!(0.01));
    }

    #[test]
    fn test_strictly_decreasing_in_inflation() {
        let low = adjust_for_inflation(dec!(1000), dec!(2.0), dec!(10)).unwrap();
        let high = adjust_for_inflation(dec!(1000), dec!(5.0), dec!(10)).unwrap();
        assert!(high < low);
        assert!(low < dec!(1000));
    }

    #[test]
    fn test_deflation_raises_adjusted_cost() {
        let adjusted = adjust_for_inflation(dec!(1000), dec!(-2.0), dec!(10)).unwrap();
        assert!(adjusted > dec!(1000));
    }

    #[test]
    fn test_rate_floor_rejected() {
        assert!(adjust_for_inflation(dec!(1000), dec!(-100), dec!(10)).is_err());
        assert!(adjust_for_inflation(dec!(1000), dec!(-250), dec!(10)).is_err());
    }
}
