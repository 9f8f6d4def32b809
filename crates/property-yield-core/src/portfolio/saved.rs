use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::analysis::roi::calculate_roi_with;
use crate::error::PropertyYieldError;
use crate::policy::PolicyConfig;
use crate::property::PropertyInput;
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A property scenario the user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProperty {
    pub id: String,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub input: PropertyInput,
}

impl SavedProperty {
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Ordering options for the saved list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    YieldHigh,
    YieldLow,
    CashflowHigh,
    CashflowLow,
    PriceHigh,
    PriceLow,
}

impl FromStr for SortKey {
    type Err = PropertyYieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "yield_high" => Ok(SortKey::YieldHigh),
            "yield_low" => Ok(SortKey::YieldLow),
            "cashflow_high" => Ok(SortKey::CashflowHigh),
            "cashflow_low" => Ok(SortKey::CashflowLow),
            "price_high" => Ok(SortKey::PriceHigh),
            "price_low" => Ok(SortKey::PriceLow),
            other => Err(PropertyYieldError::InvalidInput {
                field: "sort".into(),
                reason: format!("unknown sort key '{other}'"),
            }),
        }
    }
}

/// A saved scenario with the figures the list view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProperty {
    pub id: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    pub price: Money,
    pub net_yield: Percent,
    pub monthly_cash_flow: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Filter saved scenarios by address and order them.
///
/// The search is a case-insensitive substring match on the address; an empty
/// search keeps everything. Ties keep their original relative order.
pub fn rank_saved(
    policy: &PolicyConfig,
    items: &[SavedProperty],
    search: &str,
    sort: SortKey,
) -> Vec<RankedProperty> {
    let needle = search.trim().to_lowercase();

    let mut ranked: Vec<(i64, RankedProperty)> = items
        .iter()
        .filter(|item| needle.is_empty() || item.input.address.to_lowercase().contains(&needle))
        .map(|item| {
            let metrics = calculate_roi_with(policy, &item.input);
            let price = item.input.resolve(&policy.defaults).price;
            (
                item.timestamp,
                RankedProperty {
                    id: item.id.clone(),
                    address: item.input.address.clone(),
                    saved_at: item.saved_at(),
                    price,
                    net_yield: metrics.net_yield,
                    monthly_cash_flow: metrics.monthly_cash_flow,
                },
            )
        })
        .collect();

    ranked.sort_by(|(ts_a, a), (ts_b, b)| compare(sort, (*ts_a, a), (*ts_b, b)));
    log::debug!("ranked {} of {} saved analyses by {:?}", ranked.len(), items.len(), sort);

    ranked.into_iter().map(|(_, r)| r).collect()
}

fn compare(sort: SortKey, a: (i64, &RankedProperty), b: (i64, &RankedProperty)) -> Ordering {
    let desc = |x: Decimal, y: Decimal| y.cmp(&x);
    match sort {
        SortKey::Newest => b.0.cmp(&a.0),
        SortKey::Oldest => a.0.cmp(&b.0),
        SortKey::YieldHigh => desc(a.1.net_yield, b.1.net_yield),
        SortKey::YieldLow => a.1.net_yield.cmp(&b.1.net_yield),
        SortKey::CashflowHigh => desc(a.1.monthly_cash_flow, b.1.monthly_cash_flow),
        SortKey::CashflowLow => a.1.monthly_cash_flow.cmp(&b.1.monthly_cash_flow),
        SortKey::PriceHigh => desc(a.1.price, b.1.price),
        SortKey::PriceLow => a.1.price.cmp(&b.1.price),
    }
}
