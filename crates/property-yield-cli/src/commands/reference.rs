use clap::Args;
use property_yield_core::numeric::parse_decimal;
use property_yield_core::{format_currency, PolicyConfig};
use serde_json::{json, Value};

/// Arguments for currency formatting
#[derive(Args)]
pub struct FormatArgs {
    /// Amount to render; blank or non-numeric renders as €0.00
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = parse_decimal(&args.amount);
    Ok(json!({
        "amount": amount,
        "formatted": format_currency(amount),
    }))
}

pub fn run_policy(policy: &PolicyConfig) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(policy)?)
}
