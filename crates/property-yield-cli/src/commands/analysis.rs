use clap::Args;
use property_yield_core::analysis::{projection, roi, sensitivity};
use property_yield_core::charges::apply_derived_charges;
use property_yield_core::{PolicyConfig, PropertyInput};
use serde_json::Value;

use crate::input;

/// Arguments shared by the commands that read one property record
#[derive(Args)]
pub struct PropertyArgs {
    /// Path to a JSON property record (form field names, camelCase)
    #[arg(long)]
    pub input: Option<String>,

    /// Recompute property tax from price and insurance from floor area first
    #[arg(long)]
    pub derive_charges: bool,
}

/// Arguments for the sensitivity report
#[derive(Args)]
pub struct SensitivityArgs {
    #[command(flatten)]
    pub property: PropertyArgs,

    /// Order rows by swing, largest first (tornado order)
    #[arg(long)]
    pub tornado: bool,
}

pub fn run_analyze(args: PropertyArgs, policy: &PolicyConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let property = read_property(&args, policy)?;
    let output = roi::analyze_property_with(policy, &property);
    Ok(serde_json::to_value(output)?)
}

pub fn run_sensitivity(args: SensitivityArgs, policy: &PolicyConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let property = read_property(&args.property, policy)?;
    let mut items = sensitivity::calculate_sensitivity_with(policy, &property);
    if args.tornado {
        items.sort_by(|a, b| b.swing().cmp(&a.swing()));
    }
    Ok(serde_json::to_value(items)?)
}

pub fn run_projection(args: PropertyArgs, policy: &PolicyConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let property = read_property(&args, policy)?;
    let metrics = roi::calculate_roi_with(policy, &property);
    let years = projection::project_cash_flows_with(&policy.projection, &metrics);
    Ok(serde_json::to_value(years)?)
}

fn read_property(args: &PropertyArgs, policy: &PolicyConfig) -> Result<PropertyInput, Box<dyn std::error::Error>> {
    let document = input::read_document(args.input.as_deref())?
        .ok_or("a property record is required (provide --input or pipe JSON on stdin)")?;
    let property = PropertyInput::from_value(document);
    if args.derive_charges {
        return Ok(apply_derived_charges(&property, policy));
    }
    Ok(property)
}
