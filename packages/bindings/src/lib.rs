use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Term sweep
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_terms(input_json: String) -> NapiResult<String> {
    let params: credit_length_core::sweep::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_length_core::sweep::evaluate_terms(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sweep_standard(input_json: String) -> NapiResult<String> {
    let params: credit_length_core::sweep::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_length_core::sweep::sweep_standard(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sweep_overpayment(input_json: String) -> NapiResult<String> {
    let params: credit_length_core::sweep::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_length_core::sweep::sweep_overpayment(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sweep_investment_surplus(input_json: String) -> NapiResult<String> {
    let params: credit_length_core::sweep::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credit_length_core::sweep::sweep_investment_surplus(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn investment_balance(input_json: String) -> NapiResult<String> {
    let input: credit_length_core::investment::InvestmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credit_length_core::investment::calculate_investment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
