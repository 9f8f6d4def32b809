//! Coercion helpers shared by every calculation.
//!
//! Form fields arrive as `number | ""`, occasionally as numeric strings or `null`.
//! They are carried as `Option<Decimal>` and resolved in exactly one place
//! ([`crate::property::PropertyInput::resolve`]) using [`or_default`].

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

use crate::types::{Money, Percent};

/// Resolve a tri-state field: blank takes `default`, anything else is used as given.
pub fn or_default(value: Option<Decimal>, default: Decimal) -> Decimal {
    value.unwrap_or(default)
}

/// Round half away from zero to whole euros.
pub fn round_euro(value: Money) -> Money {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator * 100`, or zero when the denominator is zero.
pub fn percent_of(numerator: Decimal, denominator: Decimal) -> Percent {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .and_then(|q| q.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Interpret a JSON value as a number the way a form field would.
///
/// Numbers and numeric strings parse; empty strings, `null`, booleans, arrays,
/// objects, and non-finite floats are blank.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(decimal_from_f64)
            }
        }
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Parse a plain numeric string (`"1500"`, `" 4.5 "`, `"1e3"`).
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// serde `deserialize_with` target for tri-state numeric fields.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

/// serde `deserialize_with` target for free-text fields; non-strings become empty.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_blank_values_are_none() {
        assert_eq!(decimal_from_value(&json!("")), None);
        assert_eq!(decimal_from_value(&json!("   ")), None);
        assert_eq!(decimal_from_value(&json!(null)), None);
        assert_eq!(decimal_from_value(&json!(true)), None);
        assert_eq!(decimal_from_value(&json!([1, 2])), None);
        assert_eq!(decimal_from_value(&json!("abc")), None);
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(decimal_from_value(&json!(1500)), Some(dec!(1500)));
        assert_eq!(decimal_from_value(&json!(4.5)), Some(dec!(4.5)));
        assert_eq!(decimal_from_value(&json!(" 350000 ")), Some(dec!(350000)));
        assert_eq!(decimal_from_value(&json!("1e3")), Some(dec!(1000)));
    }

    #[test]
    fn test_non_finite_float_is_blank() {
        assert_eq!(decimal_from_f64(f64::NAN), None);
        assert_eq!(decimal_from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_percent_of_zero_denominator() {
        assert_eq!(percent_of(dec!(18000), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent_of(dec!(18000), dec!(300000)), dec!(6));
    }

    #[test]
    fn test_round_euro_midpoint() {
        assert_eq!(round_euro(dec!(2.5)), dec!(3));
        assert_eq!(round_euro(dec!(1319.59)), dec!(1320));
        assert_eq!(round_euro(dec!(1000.49)), dec!(1000));
    }
}
