use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Amounts in euro.
pub type Money = Decimal;

/// Fractions (0.05 = 5%), used by policy tables.
pub type Rate = Decimal;

/// Percentages as entered on the form and reported back (5 = 5%).
pub type Percent = Decimal;

/// Envelope for analyses that carry methodology notes and warnings alongside the figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// Policy values the result depends on
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub currency: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap `result`, timing the computation from `started`.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    started: Instant,
    result: T,
) -> ComputationOutput<T> {
    let assumptions = serde_json::to_value(assumptions).unwrap_or_else(|e| {
        log::warn!("assumptions not serializable: {e}");
        serde_json::Value::Null
    });
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions,
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            currency: "EUR".to_string(),
            computation_time_us: started.elapsed().as_micros() as u64,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
