use clap::Args;
use property_yield_core::portfolio::saved::{rank_saved, SavedProperty, SortKey};
use property_yield_core::PolicyConfig;
use serde_json::Value;

use crate::input;

/// Arguments for ranking saved analyses
#[derive(Args)]
pub struct RankArgs {
    /// Path to a JSON array of saved analyses ({ id, timestamp, input })
    #[arg(long)]
    pub input: Option<String>,

    /// Case-insensitive address filter
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort order: newest, oldest, yield-high, yield-low, cashflow-high, cashflow-low, price-high, price-low
    #[arg(long, default_value = "newest")]
    pub sort: String,
}

pub fn run_rank(args: RankArgs, policy: &PolicyConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let sort: SortKey = args.sort.parse()?;
    let document = input::read_document(args.input.as_deref())?
        .ok_or("a list of saved analyses is required (provide --input or pipe JSON on stdin)")?;
    let items: Vec<SavedProperty> = serde_json::from_value(document)?;

    let ranked = rank_saved(policy, &items, &args.search, sort);
    Ok(serde_json::to_value(ranked)?)
}
