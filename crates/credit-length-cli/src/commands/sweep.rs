use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_length_core::sweep::{self, LoanParameters};

use crate::input;

/// Arguments shared by the sweep subcommands
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SweepArgs {
    /// Path to a JSON or YAML parameter file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Credit amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual credit rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Expected annual inflation as a percentage (may be negative)
    #[arg(long)]
    pub inflation: Option<Decimal>,

    /// Acceptable monthly payment budget
    #[arg(long)]
    pub acceptable_payment: Option<Decimal>,

    /// Annual investment interest rate as a percentage
    #[arg(long)]
    pub investment_rate: Option<Decimal>,
}

fn load_parameters(args: &SweepArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_typed(path);
    }
    if let Some(params) = input::stdin::read_typed()? {
        return Ok(params);
    }

    Ok(LoanParameters {
        credit_amount: args
            .amount
            .ok_or("--amount is required (or provide --input)")?,
        credit_rate: vec![args.rate.ok_or("--rate is required (or provide --input)")?],
        expected_inflation: vec![args
            .inflation
            .ok_or("--inflation is required (or provide --input)")?],
        acceptable_monthly_payment: args.acceptable_payment.map(|value| vec![value]),
        investment_interest_rate: args.investment_rate.map(|value| vec![value]),
    })
}

pub fn run_sweep(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_parameters(&args)?;
    let result = sweep::evaluate_terms(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_standard(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_parameters(&args)?;
    let results = sweep::sweep_standard(&params)?;
    Ok(serde_json::to_value(results)?)
}

pub fn run_overpayment(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_parameters(&args)?;
    let results = sweep::sweep_overpayment(&params)?;
    Ok(serde_json::to_value(results)?)
}

pub fn run_invest_surplus(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_parameters(&args)?;
    let results = sweep::sweep_investment_surplus(&params)?;
    Ok(serde_json::to_value(results)?)
}
