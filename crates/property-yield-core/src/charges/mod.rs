//! Recurring property charges that can be estimated from the listing itself.

pub mod insurance;
pub mod lpt;

use rust_decimal::Decimal;

use crate::policy::PolicyConfig;
use crate::property::PropertyInput;

/// Refresh the derived expense fields of a record.
///
/// `propertyTaxYearly` follows the price and `insuranceYearly` follows the floor
/// area. Each is cleared to blank when its driver is blank or not positive.
pub fn apply_derived_charges(input: &PropertyInput, policy: &PolicyConfig) -> PropertyInput {
    let mut next = input.clone();

    next.property_tax_yearly = match input.price {
        Some(price) if price > Decimal::ZERO => Some(lpt::calculate_lpt_with(&policy.lpt, price)),
        _ => None,
    };

    next.insurance_yearly = match input.sq_meters {
        Some(area) if area > Decimal::ZERO => Some(insurance::calculate_insurance_with(
            &policy.insurance,
            Decimal::ZERO,
            input.property_type_or_default(),
            area,
            &input.address,
        )),
        _ => None,
    };

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_derives_tax_and_insurance() {
        let input = PropertyInput {
            price: Some(dec!(350000)),
            sq_meters: Some(dec!(100)),
            property_tax_yearly: Some(dec!(1)),
            ..Default::default()
        };
        let derived = apply_derived_charges(&input, &PolicyConfig::default());
        assert_eq!(derived.property_tax_yearly, Some(dec!(206)));
        assert_eq!(derived.insurance_yearly, Some(dec!(300)));
        assert_eq!(derived.price, input.price);
    }

    #[test]
    fn test_clears_when_drivers_blank() {
        let input = PropertyInput {
            price: Some(Decimal::ZERO),
            property_tax_yearly: Some(dec!(500)),
            insurance_yearly: Some(dec!(450)),
            ..Default::default()
        };
        let derived = apply_derived_charges(&input, &PolicyConfig::default());
        assert_eq!(derived.property_tax_yearly, None);
        assert_eq!(derived.insurance_yearly, None);
    }
}
