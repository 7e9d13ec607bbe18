mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::investment::InvestmentArgs;
use commands::sweep::SweepArgs;

/// Loan term trade-off estimation
#[derive(Parser)]
#[command(
    name = "cle",
    version,
    about = "Loan term trade-off estimation",
    long_about = "A CLI for comparing candidate loan terms (3-30 years) with decimal \
                  precision. Evaluates the standard amortisation schedule, voluntary \
                  overpayment with early payoff, and investment of the payment surplus."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every calculation mode the parameters support
    Sweep(SweepArgs),
    /// Standard fixed-payment schedule per term
    Standard(SweepArgs),
    /// Overpayment schedule with early payoff per term
    Overpayment(SweepArgs),
    /// Standard schedule with the payment surplus invested
    InvestSurplus(SweepArgs),
    /// Standalone investment balance projection
    Investment(InvestmentArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sweep(args) => commands::sweep::run_sweep(args),
        Commands::Standard(args) => commands::sweep::run_standard(args),
        Commands::Overpayment(args) => commands::sweep::run_overpayment(args),
        Commands::InvestSurplus(args) => commands::sweep::run_invest_surplus(args),
        Commands::Investment(args) => commands::investment::run_investment(args),
        Commands::Version => {
            println!("cle {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
