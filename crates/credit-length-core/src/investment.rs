//! Investment account modelling: compound growth of an initial lump sum plus
//! a recurring monthly contribution at a fixed annual rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditLengthError;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::CreditLengthResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a standalone investment projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Lump sum invested at the start.
    pub initial_amount: Money,
    /// Contribution added at the end of each month.
    pub monthly_contribution: Money,
    /// Annual rate as a percentage (6.0 = 6%).
    pub annual_rate_pct: Percent,
    /// Investment horizon in years; fractional years are allowed.
    pub years: Years,
}

/// Output from `calculate_investment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentOutput {
    /// Future value of the initial lump sum.
    pub lump_sum_value: Money,
    /// Future value of the contribution stream.
    pub contribution_value: Money,
    /// Final balance (sum of the two components).
    pub balance: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Final balance of an account holding `initial_amount` and receiving
/// `monthly_contribution` at each month end, compounding monthly at
/// `annual_rate_pct / 12`.
///
/// Negative money, a negative rate, or a non-positive horizon indicates a
/// caller defect and is rejected rather than clamped. The result is rounded
/// to cent precision.
pub fn compute_balance(
    initial_amount: Money,
    monthly_contribution: Money,
    annual_rate_pct: Percent,
    years: Years,
) -> CreditLengthResult<Money> {
    if initial_amount < Decimal::ZERO {
        return Err(CreditLengthError::InvalidInput {
            field: "initial_amount".into(),
            reason: "Initial investment cannot be negative".into(),
        });
    }
    if monthly_contribution < Decimal::ZERO {
        return Err(CreditLengthError::InvalidInput {
            field: "monthly_contribution".into(),
            reason: "Monthly contribution cannot be negative".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(CreditLengthError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if years <= Decimal::ZERO {
        return Err(CreditLengthError::InvalidInput {
            field: "years".into(),
            reason: "Investment period must be positive".into(),
        });
    }

    let monthly_rate = annual_rate_pct / PERCENT / MONTHS_PER_YEAR;
    let months = years * MONTHS_PER_YEAR;

    let growth = time_value::compound_fractional(monthly_rate, months)?;
    let lump_sum_value = initial_amount * growth;
    let contribution_value =
        time_value::annuity_future_value(monthly_contribution, monthly_rate, months)?;

    Ok((lump_sum_value + contribution_value).round_dp(2))
}

/// Envelope operation over `compute_balance`, decomposing the balance into
/// its lump-sum and contribution components.
pub fn calculate_investment(
    input: &InvestmentInput,
) -> CreditLengthResult<ComputationOutput<InvestmentOutput>> {
    let start = Instant::now();

    let balance = compute_balance(
        input.initial_amount,
        input.monthly_contribution,
        input.annual_rate_pct,
        input.years,
    )?;

    let monthly_rate = input.annual_rate_pct / PERCENT / MONTHS_PER_YEAR;
    let months = input.years * MONTHS_PER_YEAR;
    let growth = time_value::compound_fractional(monthly_rate, months)?;
    let lump_sum_value = (input.initial_amount * growth).round_dp(2);
    let contribution_value =
        time_value::annuity_future_value(input.monthly_contribution, monthly_rate, months)?
            .round_dp(2);

    let output = InvestmentOutput {
        lump_sum_value,
        contribution_value,
        balance,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound interest with monthly contributions (ordinary annuity)",
        &serde_json::json!({
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "years": input.years.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pure_annuity_future_value() {
        // 1000/month at 6% for 10 years
        let balance = compute_balance(Decimal::ZERO, dec!(1000), dec!(6.0), dec!(10)).unwrap();
        assert_eq!(balance, dec!(163879.35));
    }

    #[test]
    fn test_lump_sum_only() {
        // 10k at 6% for 10 years: 10_000 * 1.005^120 ~ 18193.97
        let balance = compute_balance(dec!(10000), Decimal::ZERO, dec!(6.0), dec!(10)).unwrap();
        assert_eq!(balance, dec!(18193.97));
    }

    #[test]
    fn test_zero_rate_is_sum_of_contributions() {
        let balance = compute_balance(dec!(500), dec!(100), Decimal::ZERO, dec!(2)).unwrap();
        // 500 + 100 * 24
        assert_eq!(balance, dec!(2900));
    }

    #[test]
    fn test_fractional_years() {
        // 18 months of 100/month at 0%: exactly 1800
        let balance = compute_balance(Decimal::ZERO, dec!(100), Decimal::ZERO, dec!(1.5)).unwrap();
        assert_eq!(balance, dec!(1800));
    }

    #[test]
    fn test_negative_initial_amount_rejected() {
        let result = compute_balance(dec!(-1), Decimal::ZERO, dec!(5), Decimal::ONE);
        assert!(matches!(
            result,
            Err(CreditLengthError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_negative_contribution_rejected() {
        assert!(compute_balance(Decimal::ZERO, dec!(-10), dec!(5), Decimal::ONE).is_err());
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(compute_balance(Decimal::ZERO, dec!(10), dec!(-5), Decimal::ONE).is_err());
    }

    #[test]
    fn test_zero_years_rejected() {
        assert!(compute_balance(Decimal::ZERO, dec!(10), dec!(5), Decimal::ZERO).is_err());
    }

    #[test]
    fn test_calculate_investment_components_sum() {
        let input = InvestmentInput {
            initial_amount: dec!(10000),
            monthly_contribution: dec!(1000),
            annual_rate_pct: dec!(6.0),
            years: dec!(10),
        };
        let result = calculate_investment(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.lump_sum_value, dec!(18193.97));
        assert_eq!(out.contribution_value, dec!(163879.35));
        // Balance rounds the unrounded sum, so it may differ from the sum of
        // the rounded components by at most a cent.
        let diff = (out.balance - (out.lump_sum_value + out.contribution_value)).abs();
        assert!(diff <= dec!(0.01));
    }
}
