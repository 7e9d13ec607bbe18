use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_length_core::investment::{self, InvestmentInput};

use crate::input;

/// Arguments for the standalone investment projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct InvestmentArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Initial lump sum
    #[arg(long)]
    pub initial: Option<Decimal>,

    /// Monthly contribution
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// Annual rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Horizon in years (fractional years allowed)
    #[arg(long)]
    pub years: Option<Decimal>,
}

pub fn run_investment(args: InvestmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let investment_input: InvestmentInput = if let Some(ref path) = args.input {
        input::file::read_typed(path)?
    } else if let Some(piped) = input::stdin::read_typed()? {
        piped
    } else {
        InvestmentInput {
            initial_amount: args
                .initial
                .ok_or("--initial is required (or provide --input)")?,
            monthly_contribution: args
                .monthly
                .ok_or("--monthly is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        }
    };

    let result = investment::calculate_investment(&investment_input)?;
    Ok(serde_json::to_value(result)?)
}
