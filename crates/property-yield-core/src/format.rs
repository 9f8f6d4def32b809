use rust_decimal::{Decimal, RoundingStrategy};

use crate::numeric::decimal_from_f64;
use crate::types::Money;

const EURO: char = '€';

/// Render an amount as EUR with two decimals and en-IE grouping, e.g. `€1,234.56`.
///
/// A blank amount renders as `€0.00`.
pub fn format_currency(value: Option<Money>) -> String {
    let amount = value.unwrap_or(Decimal::ZERO);
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + whole.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push(EURO);
    out.push_str(&group_thousands(whole));
    out.push('.');
    out.push_str(fraction);
    out
}

/// Float entry point for callers holding a JS number. NaN and infinities render as `€0.00`.
pub fn format_currency_f64(value: f64) -> String {
    format_currency(decimal_from_f64(value))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_grouping_and_decimals() {
        assert_eq!(format_currency(Some(dec!(1234.56))), "€1,234.56");
        assert_eq!(format_currency(Some(dec!(1234567.8))), "€1,234,567.80");
        assert_eq!(format_currency(Some(dec!(999))), "€999.00");
        assert_eq!(format_currency(Some(dec!(100000))), "€100,000.00");
    }

    #[test]
    fn test_rounds_to_cents() {
        assert_eq!(format_currency(Some(dec!(0.005))), "€0.01");
        assert_eq!(format_currency(Some(dec!(129.16666))), "€129.17");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_currency(Some(dec!(-1550.5))), "-€1,550.50");
        assert_eq!(format_currency(Some(dec!(-0.001))), "€0.00");
    }

    #[test]
    fn test_blank_and_non_numeric() {
        assert_eq!(format_currency(None), "€0.00");
        assert_eq!(format_currency_f64(f64::NAN), "€0.00");
        assert_eq!(format_currency_f64(f64::INFINITY), "€0.00");
        assert_eq!(format_currency_f64(2500.0), "€2,500.00");
    }
}
