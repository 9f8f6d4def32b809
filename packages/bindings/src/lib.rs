use napi::Result as NapiResult;
use napi_derive::napi;
use property_yield_core::PolicyConfig;
use serde::Serialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Policy from an optional JSON document; absent means the default Irish tables.
fn parse_policy(policy_json: Option<String>) -> NapiResult<PolicyConfig> {
    match policy_json {
        Some(json) => PolicyConfig::from_json_str(&json).map_err(to_napi_error),
        None => Ok(PolicyConfig::default()),
    }
}

fn parse_property(input_json: &str) -> NapiResult<property_yield_core::PropertyInput> {
    property_yield_core::PropertyInput::from_json_str(input_json).map_err(to_napi_error)
}

fn to_json<T: Serialize>(output: &T) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) => property_yield_core::format::format_currency_f64(v),
        None => property_yield_core::format_currency(None),
    }
}

// ---------------------------------------------------------------------------
// Charges
// ---------------------------------------------------------------------------

/// `market_value_json` is a JSON number or string, e.g. `350000` or `"\"€350,000\""`.
#[napi]
pub fn calculate_lpt(market_value_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let policy = parse_policy(policy_json)?;
    let market_value: property_yield_core::charges::lpt::MarketValue =
        serde_json::from_str(&market_value_json).map_err(to_napi_error)?;
    let charge = property_yield_core::charges::lpt::calculate_lpt_with(&policy.lpt, market_value);
    to_json(&charge)
}

#[napi]
pub fn calculate_insurance(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let policy = parse_policy(policy_json)?;
    let input = parse_property(&input_json)?;
    let estimate =
        property_yield_core::charges::insurance::estimate_insurance(&policy.insurance, input.sq_meters);
    to_json(&estimate)
}

#[napi]
pub fn apply_derived_charges(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let policy = parse_policy(policy_json)?;
    let input = parse_property(&input_json)?;
    to_json(&property_yield_core::apply_derived_charges(&input, &policy))
}

// ---------------------------------------------------------------------------
// Financing
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mortgage_payment(input_json: String) -> NapiResult<String> {
    let input: property_yield_core::financing::mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    to_json(&property_yield_core::financing::mortgage::mortgage_payment(&input))
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: property_yield_core::financing::mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = property_yield_core::financing::mortgage::amortization_schedule(
        input.principal,
        input.annual_rate_percent,
        input.term_years,
    );
    to_json(&schedule)
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_input(input_json: String) -> NapiResult<String> {
    let input = parse_property(&input_json)?;
    to_json(&property_yield_core::validate_input(&input))
}

#[napi]
pub fn calculate_roi(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let policy = parse_policy(policy_json)?;
    let input = parse_property(&input_json)?;
    to_json(&property_yield_core::analysis::roi::calculate_roi_with(&policy, &input))
}

#[napi]
pub fn analyze_property(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let policy = parse_policy(policy_json)?;
    let input = parse_property(&input_json)?;
    to_json(&property_yield_core::analysis::roi::analyze_property_with(&policy, &input))
}

#[napi]
pub fn calculate_sensitivity(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let policy = parse_policy(policy_json)?;
    let input = parse_property(&input_json)?;
    to_json(&property_yield_core::analysis::sensitivity::calculate_sensitivity_with(
        &policy, &input,
    ))
}

/// Runs the analysis on the property record, then projects its cash flow.
#[napi]
pub fn project_cash_flows(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let policy = parse_policy(policy_json)?;
    let input = parse_property(&input_json)?;
    let metrics = property_yield_core::analysis::roi::calculate_roi_with(&policy, &input);
    to_json(&property_yield_core::analysis::projection::project_cash_flows_with(
        &policy.projection,
        &metrics,
    ))
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn rank_saved(
    saved_json: String,
    search: String,
    sort: String,
    policy_json: Option<String>,
) -> NapiResult<String> {
    let policy = parse_policy(policy_json)?;
    let items: Vec<property_yield_core::portfolio::saved::SavedProperty> =
        serde_json::from_str(&saved_json).map_err(to_napi_error)?;
    let sort: property_yield_core::portfolio::saved::SortKey = sort.parse().map_err(to_napi_error)?;
    to_json(&property_yield_core::portfolio::saved::rank_saved(
        &policy, &items, &search, sort,
    ))
}
