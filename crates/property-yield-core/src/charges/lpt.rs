use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::numeric::{decimal_from_f64, round_euro};
use crate::policy::LptSchedule;
use crate::types::Money;

/// A market value as supplied by a caller: a number, or text that may carry
/// currency symbols and thousands separators (`"€350,000"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarketValue {
    Amount(Decimal),
    Text(String),
}

impl MarketValue {
    /// Numeric value, or `None` when text contains no digits or does not fit a Decimal.
    ///
    /// Text keeps only its ASCII digits, so any decimal point is discarded along
    /// with the symbols and separators.
    pub fn to_amount(&self) -> Option<Money> {
        match self {
            MarketValue::Amount(amount) => Some(*amount),
            MarketValue::Text(text) => {
                let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
                if digits.is_empty() {
                    return None;
                }
                Decimal::from_str(&digits).ok()
            }
        }
    }
}

impl From<Decimal> for MarketValue {
    fn from(amount: Decimal) -> Self {
        MarketValue::Amount(amount)
    }
}

impl From<i64> for MarketValue {
    fn from(amount: i64) -> Self {
        MarketValue::Amount(Decimal::from(amount))
    }
}

impl From<f64> for MarketValue {
    fn from(amount: f64) -> Self {
        // Non-finite floats carry no value; zero maps to a zero charge.
        MarketValue::Amount(decimal_from_f64(amount).unwrap_or(Decimal::ZERO))
    }
}

impl From<&str> for MarketValue {
    fn from(text: &str) -> Self {
        MarketValue::Text(text.to_string())
    }
}

impl From<String> for MarketValue {
    fn from(text: String) -> Self {
        MarketValue::Text(text)
    }
}

/// Annual Local Property Tax for a market value under the default Irish schedule.
pub fn calculate_lpt(market_value: impl Into<MarketValue>) -> Money {
    calculate_lpt_with(&LptSchedule::default(), market_value)
}

/// Annual Local Property Tax under `schedule`, in whole euros.
///
/// Non-positive or unreadable values pay nothing. Values up to the threshold pay
/// the charge of the first band whose upper bound covers them; values above it
/// pay the base charge plus each graduated slice, rounded once at the end.
pub fn calculate_lpt_with(schedule: &LptSchedule, market_value: impl Into<MarketValue>) -> Money {
    let value = match market_value.into().to_amount() {
        Some(v) if v > Decimal::ZERO => v,
        _ => return Decimal::ZERO,
    };

    if value <= schedule.threshold {
        let charge = schedule
            .bands
            .iter()
            .find(|band| value <= band.upper_bound)
            .map(|band| band.charge)
            .unwrap_or(schedule.base_charge);
        log::debug!("LPT band charge for {value}: {charge}");
        return charge;
    }

    let mut total = schedule.base_charge;
    let mut floor = schedule.threshold;
    for tier in &schedule.tiers {
        let ceiling = tier.upper_bound.map_or(value, |upper| upper.min(value));
        if ceiling > floor {
            total = total.saturating_add((ceiling - floor).saturating_mul(tier.rate));
        }
        match tier.upper_bound {
            Some(upper) if upper < value => floor = upper,
            _ => break,
        }
    }

    let charge = round_euro(total);
    log::debug!("LPT graduated charge for {value}: {charge}");
    charge
}
