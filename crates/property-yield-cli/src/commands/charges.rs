use clap::Args;
use property_yield_core::charges::{insurance, lpt};
use property_yield_core::{PolicyConfig, PropertyType};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Arguments for the Local Property Tax estimate
#[derive(Args)]
pub struct LptArgs {
    /// Market value, as a number or text such as "€350,000"
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for the buildings insurance estimate
#[derive(Args)]
pub struct InsuranceArgs {
    /// Floor area in square metres
    #[arg(long)]
    pub sq_meters: Decimal,

    /// Property type label, e.g. "Semi-Detached House"
    #[arg(long, default_value = "House")]
    pub property_type: String,

    /// Address, for the record only
    #[arg(long, default_value = "")]
    pub address: String,
}

#[derive(Debug, Serialize)]
struct LptOutput {
    market_value: Option<Decimal>,
    annual_lpt: Decimal,
}

#[derive(Debug, Serialize)]
struct InsuranceOutput {
    property_type: PropertyType,
    sq_meters: Decimal,
    reinstatement_cost: Decimal,
    annual_premium: Decimal,
}

pub fn run_lpt(args: LptArgs, policy: &PolicyConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let market_value = lpt::MarketValue::from(args.value);
    let output = LptOutput {
        market_value: market_value.to_amount(),
        annual_lpt: lpt::calculate_lpt_with(&policy.lpt, market_value),
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_insurance(args: InsuranceArgs, policy: &PolicyConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let property_type = PropertyType::from_label(&args.property_type).ok_or_else(|| {
        let known: Vec<&str> = PropertyType::ALL.iter().map(|t| t.label()).collect();
        format!(
            "Unknown property type '{}'. Use one of: {}",
            args.property_type,
            known.join(", ")
        )
    })?;

    let estimate = insurance::estimate_insurance(&policy.insurance, Some(args.sq_meters));
    let annual_premium = insurance::calculate_insurance_with(
        &policy.insurance,
        Decimal::ZERO,
        property_type,
        args.sq_meters,
        &args.address,
    );

    let output = InsuranceOutput {
        property_type,
        sq_meters: args.sq_meters,
        reinstatement_cost: estimate.reinstatement_cost,
        annual_premium,
    };
    Ok(serde_json::to_value(output)?)
}
