use clap::Args;
use property_yield_core::financing::mortgage::{self, MortgageInput};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::input;

/// Arguments for the mortgage calculator
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON input file with principal, annual_rate_percent and term_years
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (4.0 = 4%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term: Option<Decimal>,

    /// Include the month-by-month amortization schedule
    #[arg(long)]
    pub schedule: bool,
}

#[derive(Debug, Serialize)]
struct MortgageOutput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: Decimal,
    monthly_payment: Decimal,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: MortgageInput = if let Some(data) = input::read_document(args.input.as_deref())? {
        serde_json::from_value(data)?
    } else {
        MortgageInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term.ok_or("--term is required (or provide --input)")?,
        }
    };

    if args.schedule {
        let schedule =
            mortgage::amortization_schedule(loan.principal, loan.annual_rate_percent, loan.term_years);
        return Ok(serde_json::to_value(schedule)?);
    }

    let output = MortgageOutput {
        monthly_payment: mortgage::mortgage_payment(&loan),
        principal: loan.principal,
        annual_rate_percent: loan.annual_rate_percent,
        term_years: loan.term_years,
    };
    Ok(serde_json::to_value(output)?)
}
