use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CreditLengthError;
use crate::types::{Money, Rate};
use crate::CreditLengthResult;

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, periods: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..periods {
        result *= factor;
    }
    result
}

/// Compute (1 + r)^n for a possibly fractional period count.
///
/// The whole part compounds iteratively; only a fractional remainder falls
/// back to `powd`.
pub fn compound_fractional(rate: Rate, periods: Decimal) -> CreditLengthResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(CreditLengthError::InvalidInput {
            field: "rate".into(),
            reason: "Growth rate must be greater than -100%".into(),
        });
    }

    let whole = periods.trunc();
    let n = whole
        .to_u32()
        .ok_or_else(|| CreditLengthError::InvalidInput {
            field: "periods".into(),
            reason: "Period count must be non-negative and within range".into(),
        })?;

    let mut result = compound(rate, n);
    let frac = periods - whole;
    if !frac.is_zero() {
        result *= (Decimal::ONE + rate).powd(frac);
    }
    Ok(result)
}

/// Level payment that fully amortises `principal` over `periods` at `rate`
/// per period: principal * r(1+r)^n / ((1+r)^n - 1).
///
/// A zero rate degenerates to straight-line repayment.
pub fn annuity_payment(principal: Money, rate: Rate, periods: u32) -> CreditLengthResult<Money> {
    if periods == 0 {
        return Err(CreditLengthError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound(rate, periods);
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(CreditLengthError::DivisionByZero {
            context: "annuity payment factor".into(),
        });
    }

    Ok(principal * rate * factor / denom)
}

/// Future value of a level payment stream (ordinary annuity, payment at
/// period end): pmt * ((1+r)^n - 1) / r. Supports fractional period counts.
pub fn annuity_future_value(
    payment: Money,
    rate: Rate,
    periods: Decimal,
) -> CreditLengthResult<Money> {
    if rate.is_zero() {
        return Ok(payment * periods);
    }

    let factor = compound_fractional(rate, periods)?;
    Ok(payment * (factor - Decimal::ONE) / rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_basic() {
        // 1.1^3 = 1.331
        assert_eq!(compound(dec!(0.10), 3), dec!(1.331));
    }

    #[test]
    fn test_compound_zero_periods() {
        assert_eq!(compound(dec!(0.10), 0), Decimal::ONE);
    }

    #[test]
    fn test_compound_fractional_matches_integer() {
        let whole = compound(dec!(0.005), 120);
        let frac = compound_fractional(dec!(0.005), dec!(120)).unwrap();
        assert_eq!(whole, frac);
    }

    #[test]
    fn test_compound_fractional_half_period() {
        // (1.1)^0.5 ~ 1.0488
        let result = compound_fractional(dec!(0.10), dec!(0.5)).unwrap();
        assert!((result - dec!(1.0488)).abs() < dec!(0.001));
    }

    #[test]
    fn test_compound_fractional_rejects_rate_floor() {
        assert!(compound_fractional(dec!(-1), dec!(12)).is_err());
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        // Straight-line: 120000 over 120 periods = 1000 exactly
        let pmt = annuity_payment(dec!(120000), Decimal::ZERO, 120).unwrap();
        assert_eq!(pmt, dec!(1000));
    }

    #[test]
    fn test_annuity_payment_known_value() {
        // 100k at 0.5%/month over 120 months ~ 1110.21
        let pmt = annuity_payment(dec!(100000), dec!(0.005), 120).unwrap();
        assert!((pmt - dec!(1110.21)).abs() < dec!(0.01));
    }

    #[test]
    fn test_annuity_payment_zero_periods_rejected() {
        assert!(annuity_payment(dec!(1000), dec!(0.005), 0).is_err());
    }

    #[test]
    fn test_annuity_future_value_zero_rate() {
        let fv = annuity_future_value(dec!(1000), Decimal::ZERO, dec!(120)).unwrap();
        assert_eq!(fv, dec!(120000));
    }

    #[test]
    fn test_annuity_future_value_known_value() {
        // 1000/month at 0.5%/month for 120 months ~ 163879.35
        let fv = annuity_future_value(dec!(1000), dec!(0.005), dec!(120)).unwrap();
        assert!((fv - dec!(163879.35)).abs() < dec!(0.01));
    }
}
