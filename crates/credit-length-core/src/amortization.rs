//! Loan amortisation: the standard fixed-payment schedule and the
//! overpayment variant that simulates early payoff month by month.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CreditLengthError;
use crate::investment;
use crate::time_value;
use crate::types::{Money, Percent, Rate};
use crate::CreditLengthResult;

/// Minimum balance threshold below which the loan is considered fully paid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Standard fixed-payment schedule summary for one term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardTerm {
    pub monthly_payment: Money,
    pub total_cost: Money,
}

/// Overpayment schedule summary for one term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpaymentTerm {
    /// The payment actually made each month.
    pub monthly_payment: Money,
    /// Total paid to the lender, net of the investment gain.
    pub total_cost: Money,
    /// Value of the freed-up budget invested after early payoff.
    pub investment_balance: Money,
    /// Months until the balance cleared (the nominal month count if the
    /// budget never exceeded the required payment).
    pub months_to_payoff: u32,
}

// ---------------------------------------------------------------------------
// Standard schedule
// ---------------------------------------------------------------------------

/// Fixed monthly payment and total cost for a fully amortising loan.
///
/// The payment is rounded to cent precision first; total cost accrues that
/// quoted payment over the full month count.
pub fn standard_term(
    principal: Money,
    monthly_rate: Rate,
    term_years: u32,
) -> CreditLengthResult<StandardTerm> {
    validate_loan(principal, monthly_rate, term_years)?;

    let months = term_years * MONTHS_PER_YEAR;
    let monthly_payment = time_value::annuity_payment(principal, monthly_rate, months)?.round_dp(2);
    let total_cost = monthly_payment * Decimal::from(months);

    Ok(StandardTerm {
        monthly_payment,
        total_cost,
    })
}

// ---------------------------------------------------------------------------
// Overpayment schedule
// ---------------------------------------------------------------------------

/// Schedule where the borrower pays a fixed `acceptable_payment` each month,
/// clearing the balance early when it exceeds the required payment. Once the
/// loan clears, the full budget is assumed invested at `investment_rate_pct`
/// for the months the nominal schedule had left, and that gain offsets the
/// total cost.
pub fn overpayment_term(
    principal: Money,
    monthly_rate: Rate,
    term_years: u32,
    acceptable_payment: Money,
    investment_rate_pct: Percent,
) -> CreditLengthResult<OverpaymentTerm> {
    if acceptable_payment < Decimal::ZERO {
        return Err(CreditLengthError::InvalidInput {
            field: "acceptable_payment".into(),
            reason: "Acceptable payment cannot be negative".into(),
        });
    }
    if investment_rate_pct < Decimal::ZERO {
        return Err(CreditLengthError::InvalidInput {
            field: "investment_rate_pct".into(),
            reason: "Investment rate cannot be negative".into(),
        });
    }

    let standard = standard_term(principal, monthly_rate, term_years)?;
    let total_months = term_years * MONTHS_PER_YEAR;

    // A budget at or below the required payment changes nothing.
    if acceptable_payment <= standard.monthly_payment {
        return Ok(OverpaymentTerm {
            monthly_payment: standard.monthly_payment,
            total_cost: standard.total_cost,
            investment_balance: Decimal::ZERO,
            months_to_payoff: total_months,
        });
    }

    let mut balance = principal;
    let mut total_paid = Decimal::ZERO;
    let mut elapsed: u32 = 0;

    while balance > BALANCE_EPSILON && elapsed < total_months {
        let interest = balance * monthly_rate;
        let principal_portion = acceptable_payment - interest;
        if principal_portion <= Decimal::ZERO {
            // Payment no longer covers interest; payoff cannot complete.
            break;
        }
        balance -= principal_portion;
        total_paid += acceptable_payment;
        elapsed += 1;
    }

    let paid_off = balance <= BALANCE_EPSILON;
    let remaining_months = total_months - elapsed;

    let investment_balance = if paid_off && remaining_months > 0 {
        investment::compute_balance(
            Decimal::ZERO,
            acceptable_payment,
            investment_rate_pct,
            Decimal::from(remaining_months) / Decimal::from(MONTHS_PER_YEAR),
        )?
    } else {
        Decimal::ZERO
    };

    Ok(OverpaymentTerm {
        monthly_payment: acceptable_payment.round_dp(2),
        total_cost: (total_paid - investment_balance).round_dp(2),
        investment_balance,
        months_to_payoff: elapsed,
    })
}

fn validate_loan(principal: Money, monthly_rate: Rate, term_years: u32) -> CreditLengthResult<()> {
    if principal < Decimal::ZERO {
        return Err(CreditLengthError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }
    if monthly_rate < Decimal::ZERO {
        return Err(CreditLengthError::InvalidInput {
            field: "monthly_rate".into(),
            reason: "Monthly rate cannot be negative".into(),
        });
    }
    if term_years == 0 {
        return Err(CreditLengthError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least one year".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ---------------------------------------------------------------
    // 1. Standard schedule: known annuity figures
    // ---------------------------------------------------------------
    #[test]
    fn test_standard_term_known_values() {
        // 100k at 6% APR over 10 years
        let term = standard_term(dec!(100000), dec!(0.005), 10).unwrap();
        assert_eq!(term.monthly_payment, dec!(1110.21));
        assert_eq!(term.total_cost, dec!(133225.20));
    }

    // ---------------------------------------------------------------
    // 2. Standard schedule: zero rate is straight-line, exactly
    // ---------------------------------------------------------------
    #[test]
    fn test_standard_term_zero_rate() {
        let term = standard_term(dec!(120000), Decimal::ZERO, 10).unwrap();
        assert_eq!(term.monthly_payment, dec!(1000));
        assert_eq!(term.total_cost, dec!(120000));
    }

    // ---------------------------------------------------------------
    // 3. Validation
    // ---------------------------------------------------------------
    #[test]
    fn test_standard_term_rejects_negative_principal() {
        assert!(standard_term(dec!(-1), dec!(0.005), 10).is_err());
    }

    #[test]
    fn test_standard_term_rejects_zero_term() {
        assert!(standard_term(dec!(1000), dec!(0.005), 0).is_err());
    }

    // ---------------------------------------------------------------
    // 4. Overpayment at or below the required payment is a no-op
    // ---------------------------------------------------------------
    #[test]
    fn test_overpayment_below_required_is_noop() {
        let standard = standard_term(dec!(100000), dec!(0.005), 10).unwrap();
        let over = overpayment_term(dec!(100000), dec!(0.005), 10, dec!(500), dec!(5.0)).unwrap();

        assert_eq!(over.monthly_payment, standard.monthly_payment);
        assert_eq!(over.total_cost, standard.total_cost);
        assert_eq!(over.investment_balance, Decimal::ZERO);
        assert_eq!(over.months_to_payoff, 120);
    }

    #[test]
    fn test_overpayment_exactly_required_is_noop() {
        let standard = standard_term(dec!(100000), dec!(0.005), 10).unwrap();
        let over = overpayment_term(
            dec!(100000),
            dec!(0.005),
            10,
            standard.monthly_payment,
            dec!(5.0),
        )
        .unwrap();

        assert_eq!(over.total_cost, standard.total_cost);
        assert_eq!(over.investment_balance, Decimal::ZERO);
    }

    // ---------------------------------------------------------------
    // 5. Overpayment at zero rate: exact payoff month count
    // ---------------------------------------------------------------
    #[test]
    fn test_overpayment_zero_rate_exact_payoff() {
        // 1200 repaid at 400/month clears in 3 months; the freed budget is
        // invested at 0% for the remaining 9 months.
        let over = overpayment_term(dec!(1200), Decimal::ZERO, 1, dec!(400), Decimal::ZERO).unwrap();

        assert_eq!(over.months_to_payoff, 3);
        assert_eq!(over.investment_balance, dec!(3600));
        // 1200 paid, minus the 3600 invested
        assert_eq!(over.total_cost, dec!(-2400));
    }

    // ---------------------------------------------------------------
    // 6. Overpayment shortens the schedule and cuts cost
    // ---------------------------------------------------------------
    #[test]
    fn test_overpayment_reduces_cost_and_term() {
        let standard = standard_term(dec!(100000), dec!(0.0041666666666667), 25).unwrap();
        let over = overpayment_term(
            dec!(100000),
            dec!(0.0041666666666667),
            25,
            dec!(1500),
            dec!(4.0),
        )
        .unwrap();

        assert!(over.months_to_payoff < 300);
        assert!(over.investment_balance > Decimal::ZERO);
        assert!(over.total_cost < standard.total_cost);
    }

    // ---------------------------------------------------------------
    // 7. Far-above-required budget turns the loan into a net gain
    // ---------------------------------------------------------------
    #[test]
    fn test_overpayment_net_profit_case() {
        // 100k at 5%, 3000/month budget: payoff in ~3 years, then 22 years
        // of invested budget dwarf the interest paid.
        let over = overpayment_term(
            dec!(100000),
            dec!(0.0041666666666667),
            25,
            dec!(3000),
            dec!(5.0),
        )
        .unwrap();

        assert!(over.investment_balance > dec!(100000));
        assert!(over.total_cost < Decimal::ZERO);
    }

    // ---------------------------------------------------------------
    // 8. Zero principal: nothing owed, entire budget invested
    // ---------------------------------------------------------------
    #[test]
    fn test_overpayment_zero_principal() {
        let over = overpayment_term(Decimal::ZERO, dec!(0.005), 5, dec!(200), Decimal::ZERO).unwrap();

        assert_eq!(over.months_to_payoff, 0);
        assert_eq!(over.investment_balance, dec!(12000));
        assert_eq!(over.total_cost, dec!(-12000));
    }

    #[test]
    fn test_overpayment_rejects_negative_budget() {
        assert!(overpayment_term(dec!(1000), dec!(0.005), 5, dec!(-1), dec!(5.0)).is_err());
    }
}
