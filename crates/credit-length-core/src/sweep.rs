//! Term sweep: evaluates every candidate loan term (3-30 years) under the
//! plain, overpayment, and investment-of-surplus calculation modes.

use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization;
use crate::error::CreditLengthError;
use crate::inflation;
use crate::investment;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::CreditLengthResult;

/// Shortest candidate term, in years.
pub const MIN_TERM_YEARS: u32 = 3;
/// Longest candidate term, in years.
pub const MAX_TERM_YEARS: u32 = 30;

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Loan parameters as read from the external parameter file.
///
/// Rate-like keys are arrays; only the first element is consulted. The two
/// optional keys enable the overpayment and investment-of-surplus modes;
/// their absence makes those modes unavailable, which is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    #[serde(rename = "Credit amount")]
    pub credit_amount: Money,

    #[serde(rename = "Credit rate")]
    pub credit_rate: Vec<Percent>,

    #[serde(rename = "Expected inflation")]
    pub expected_inflation: Vec<Percent>,

    #[serde(
        rename = "Acceptable monthly payment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub acceptable_monthly_payment: Option<Vec<Money>>,

    #[serde(
        rename = "Investment interest rate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub investment_interest_rate: Option<Vec<Percent>>,
}

impl LoanParameters {
    /// Annual credit rate as a percentage.
    pub fn credit_rate_pct(&self) -> CreditLengthResult<Percent> {
        first_value(&self.credit_rate, "Credit rate")
    }

    /// Credit rate converted to a monthly decimal rate.
    pub fn monthly_rate(&self) -> CreditLengthResult<Rate> {
        Ok(self.credit_rate_pct()? / PERCENT / MONTHS_PER_YEAR)
    }

    /// Annual inflation rate as a percentage; may be negative.
    pub fn inflation_pct(&self) -> CreditLengthResult<Percent> {
        first_value(&self.expected_inflation, "Expected inflation")
    }

    /// First acceptable-payment value, if the key is present and non-empty.
    pub fn acceptable_payment(&self) -> Option<Money> {
        self.acceptable_monthly_payment
            .as_deref()
            .and_then(|values| values.first().copied())
    }

    /// First investment-rate value, if the key is present and non-empty.
    pub fn investment_rate_pct(&self) -> Option<Percent> {
        self.investment_interest_rate
            .as_deref()
            .and_then(|values| values.first().copied())
    }

    /// Fail-fast validation of every provided value.
    pub fn validate(&self) -> CreditLengthResult<()> {
        if self.credit_amount < Decimal::ZERO {
            return Err(invalid("Credit amount", "Credit amount cannot be negative"));
        }
        if self.credit_rate_pct()? < Decimal::ZERO {
            return Err(invalid("Credit rate", "Credit rate cannot be negative"));
        }
        if self.inflation_pct()? <= dec!(-100) {
            return Err(invalid(
                "Expected inflation",
                "Expected inflation must be greater than -100%",
            ));
        }
        if let Some(payment) = self.acceptable_payment() {
            if payment < Decimal::ZERO {
                return Err(invalid(
                    "Acceptable monthly payment",
                    "Acceptable monthly payment cannot be negative",
                ));
            }
        }
        if let Some(rate) = self.investment_rate_pct() {
            if rate < Decimal::ZERO {
                return Err(invalid(
                    "Investment interest rate",
                    "Investment interest rate cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

fn first_value(values: &[Decimal], key: &str) -> CreditLengthResult<Decimal> {
    values
        .first()
        .copied()
        .ok_or_else(|| invalid(key, "At least one value is required"))
}

fn invalid(field: &str, reason: &str) -> CreditLengthError {
    CreditLengthError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Per-term summary figures for one calculation mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRecord {
    pub monthly_payment: Money,
    pub total_cost: Money,
    pub total_cost_adjusted: Money,
    pub investment_balance: Money,
}

/// Mapping from term length in years to its summary record, ascending.
pub type TermResults = BTreeMap<u32, TermRecord>;

/// Results for every calculation mode the parameters support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermEvaluation {
    pub standard: TermResults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overpayment: Option<TermResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_surplus: Option<TermResults>,
}

// ---------------------------------------------------------------------------
// Per-mode sweeps
// ---------------------------------------------------------------------------

/// Standard schedule for every candidate term. Costs are inflation-adjusted
/// over each term's own horizon; `investment_balance` is always zero.
pub fn sweep_standard(params: &LoanParameters) -> CreditLengthResult<TermResults> {
    params.validate()?;
    let monthly_rate = params.monthly_rate()?;
    let inflation_pct = params.inflation_pct()?;

    let mut results = TermResults::new();
    for years in MIN_TERM_YEARS..=MAX_TERM_YEARS {
        let term = amortization::standard_term(params.credit_amount, monthly_rate, years)?;
        let adjusted =
            inflation::adjust_for_inflation(term.total_cost, inflation_pct, Decimal::from(years))?;

        results.insert(
            years,
            TermRecord {
                monthly_payment: term.monthly_payment,
                total_cost: term.total_cost,
                total_cost_adjusted: adjusted.round_dp(2),
                investment_balance: Decimal::ZERO,
            },
        );
    }
    Ok(results)
}

/// Overpayment schedule for every candidate term.
///
/// Contract: the inflation adjustment horizon is the nominal requested term,
/// uniformly for every term, so rows stay comparable with the other modes
/// (the actual payoff time is usually shorter).
pub fn sweep_overpayment(params: &LoanParameters) -> CreditLengthResult<TermResults> {
    params.validate()?;
    let acceptable = params
        .acceptable_payment()
        .ok_or_else(|| invalid("Acceptable monthly payment", "Required for the overpayment mode"))?;
    let investment_rate = params
        .investment_rate_pct()
        .ok_or_else(|| invalid("Investment interest rate", "Required for the overpayment mode"))?;
    let monthly_rate = params.monthly_rate()?;
    let inflation_pct = params.inflation_pct()?;

    let mut results = TermResults::new();
    for years in MIN_TERM_YEARS..=MAX_TERM_YEARS {
        let term = amortization::overpayment_term(
            params.credit_amount,
            monthly_rate,
            years,
            acceptable,
            investment_rate,
        )?;
        let adjusted =
            inflation::adjust_for_inflation(term.total_cost, inflation_pct, Decimal::from(years))?;

        results.insert(
            years,
            TermRecord {
                monthly_payment: term.monthly_payment,
                total_cost: term.total_cost,
                total_cost_adjusted: adjusted.round_dp(2),
                investment_balance: term.investment_balance,
            },
        );
    }
    Ok(results)
}

/// Investment-of-surplus mode: the loan runs its full standard schedule; any
/// budget above the required payment is invested each month over the full
/// term, and that balance offsets the total cost.
pub fn sweep_investment_surplus(params: &LoanParameters) -> CreditLengthResult<TermResults> {
    params.validate()?;
    let acceptable = params.acceptable_payment().ok_or_else(|| {
        invalid(
            "Acceptable monthly payment",
            "Required for the investment-of-surplus mode",
        )
    })?;
    let investment_rate = params.investment_rate_pct().ok_or_else(|| {
        invalid(
            "Investment interest rate",
            "Required for the investment-of-surplus mode",
        )
    })?;
    let monthly_rate = params.monthly_rate()?;
    let inflation_pct = params.inflation_pct()?;

    let mut results = TermResults::new();
    for years in MIN_TERM_YEARS..=MAX_TERM_YEARS {
        let term = amortization::standard_term(params.credit_amount, monthly_rate, years)?;

        let actual_payment = acceptable.max(term.monthly_payment);
        let surplus = (acceptable - term.monthly_payment).max(Decimal::ZERO);
        let investment_balance = investment::compute_balance(
            Decimal::ZERO,
            surplus,
            investment_rate,
            Decimal::from(years),
        )?;

        let total_cost = (term.total_cost - investment_balance).round_dp(2);
        let adjusted =
            inflation::adjust_for_inflation(total_cost, inflation_pct, Decimal::from(years))?;

        results.insert(
            years,
            TermRecord {
                monthly_payment: actual_payment,
                total_cost,
                total_cost_adjusted: adjusted.round_dp(2),
                investment_balance,
            },
        );
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Combined driver
// ---------------------------------------------------------------------------

/// Evaluate every candidate term under all calculation modes the parameters
/// support. A missing optional parameter downgrades the optional modes to a
/// warning instead of failing the sweep.
pub fn evaluate_terms(
    params: &LoanParameters,
) -> CreditLengthResult<ComputationOutput<TermEvaluation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    params.validate()?;
    let standard = sweep_standard(params)?;

    let optional_available = match (params.acceptable_payment(), params.investment_rate_pct()) {
        (Some(_), Some(_)) => true,
        (None, Some(_)) => {
            warnings.push(
                "\"Acceptable monthly payment\" not provided; overpayment and \
                 investment-of-surplus modes skipped"
                    .into(),
            );
            false
        }
        (Some(_), None) => {
            warnings.push(
                "\"Investment interest rate\" not provided; overpayment and \
                 investment-of-surplus modes skipped"
                    .into(),
            );
            false
        }
        (None, None) => {
            warnings.push(
                "No overpayment parameters provided; only the standard schedule was evaluated"
                    .into(),
            );
            false
        }
    };

    let (overpayment, investment_surplus) = if optional_available {
        (
            Some(sweep_overpayment(params)?),
            Some(sweep_investment_surplus(params)?),
        )
    } else {
        (None, None)
    };

    let output = TermEvaluation {
        standard,
        overpayment,
        investment_surplus,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan term sweep (3-30 years): standard, overpayment, investment-of-surplus",
        &serde_json::json!({
            "credit_amount": params.credit_amount.to_string(),
            "credit_rate_pct": params.credit_rate_pct()?.to_string(),
            "expected_inflation_pct": params.inflation_pct()?.to_string(),
            "inflation_horizon": "nominal term",
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
