mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::{PropertyArgs, SensitivityArgs};
use commands::charges::{InsuranceArgs, LptArgs};
use commands::financing::MortgageArgs;
use commands::portfolio::RankArgs;
use commands::reference::FormatArgs;

/// Rental property yield, tax and sensitivity calculations
#[derive(Parser)]
#[command(
    name = "pyc",
    version,
    about = "Rental property yield, tax and sensitivity calculations",
    long_about = "A CLI for evaluating residential buy-to-let property with decimal \
                  precision. Supports ROI analysis, sensitivity and cash-flow projection, \
                  Local Property Tax and insurance estimates, mortgage payments and \
                  ranking of saved analyses."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Policy file (JSON or YAML) overriding the default tax and cost tables
    #[arg(long, global = true)]
    policy: Option<String>,

    /// Log intermediate figures to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a property: yields, cash flow and expense breakdown
    Analyze(PropertyArgs),
    /// Net-yield response to rent, vacancy and management fee shocks
    Sensitivity(SensitivityArgs),
    /// Project annual cash flow over the policy horizon
    Projection(PropertyArgs),
    /// Estimate annual Local Property Tax from market value
    Lpt(LptArgs),
    /// Estimate annual buildings insurance from floor area
    Insurance(InsuranceArgs),
    /// Monthly mortgage payment, optionally with its amortization schedule
    Mortgage(MortgageArgs),
    /// Filter and sort saved analyses
    Rank(RankArgs),
    /// Format an amount as euro currency
    Format(FormatArgs),
    /// Print the effective policy tables
    Policy,
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
    init_logging(cli.verbose);

    if let Commands::Version = cli.command {
        println!("pyc {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match run(cli.command, cli.policy.as_deref()) {
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

fn run(command: Commands, policy_path: Option<&str>) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let policy = input::load_policy(policy_path)?;

    match command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args, &policy),
        Commands::Sensitivity(args) => commands::analysis::run_sensitivity(args, &policy),
        Commands::Projection(args) => commands::analysis::run_projection(args, &policy),
        Commands::Lpt(args) => commands::charges::run_lpt(args, &policy),
        Commands::Insurance(args) => commands::charges::run_insurance(args, &policy),
        Commands::Mortgage(args) => commands::financing::run_mortgage(args),
        Commands::Rank(args) => commands::portfolio::run_rank(args, &policy),
        Commands::Format(args) => commands::reference::run_format(args),
        Commands::Policy => commands::reference::run_policy(&policy),
        Commands::Version => Ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
    }
}

/// `RUST_LOG` wins when set; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) if verbose => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Warn);
        }
    }
    builder.init();
}
