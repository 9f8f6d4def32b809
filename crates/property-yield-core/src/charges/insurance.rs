use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::round_euro;
use crate::policy::InsurancePolicy;
use crate::property::PropertyType;
use crate::types::Money;

/// Reinstatement cost and the premium derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceEstimate {
    /// Cost to rebuild the structure from scratch
    pub reinstatement_cost: Money,
    /// Annual premium in whole euros
    pub annual_premium: Money,
}

/// Estimate buildings cover from floor area alone. No area means no estimate (zero).
pub fn estimate_insurance(policy: &InsurancePolicy, sq_meters: Option<Decimal>) -> InsuranceEstimate {
    match sq_meters {
        Some(area) if area > Decimal::ZERO => {
            // Saturates at Decimal::MAX for areas no building has
            let reinstatement_cost = area.saturating_mul(policy.reinstatement_rate_per_sq_meter);
            InsuranceEstimate {
                reinstatement_cost,
                annual_premium: round_euro(reinstatement_cost.saturating_mul(policy.premium_rate)),
            }
        }
        _ => InsuranceEstimate {
            reinstatement_cost: Decimal::ZERO,
            annual_premium: Decimal::ZERO,
        },
    }
}

/// Annual premium under the default reinstatement policy.
pub fn calculate_insurance(
    price: Money,
    property_type: PropertyType,
    sq_meters: Decimal,
    address: &str,
) -> Money {
    calculate_insurance_with(&InsurancePolicy::default(), price, property_type, sq_meters, address)
}

/// Annual premium: `round(sq_meters * rate_per_m2 * premium_rate)`.
///
/// Price, type and address are part of the call signature but do not change the
/// premium.
pub fn calculate_insurance_with(
    policy: &InsurancePolicy,
    _price: Money,
    property_type: PropertyType,
    sq_meters: Decimal,
    address: &str,
) -> Money {
    let estimate = estimate_insurance(policy, Some(sq_meters));
    log::debug!(
        "insurance for {} '{}': {} m² -> reinstatement {}, premium {}",
        property_type.label(),
        address,
        sq_meters,
        estimate.reinstatement_cost,
        estimate.annual_premium
    );
    estimate.annual_premium
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_hundred_square_metres() {
        // 100 * 2000 * 0.0015 = 300
        assert_eq!(
            calculate_insurance(Decimal::ZERO, PropertyType::House, dec!(100), ""),
            dec!(300)
        );
    }

    #[test]
    fn test_premium_scales_with_area() {
        let single = calculate_insurance(Decimal::ZERO, PropertyType::Apartment, dec!(85), "");
        let double = calculate_insurance(Decimal::ZERO, PropertyType::Apartment, dec!(170), "");
        assert_eq!(double, single * dec!(2));
    }

    #[test]
    fn test_price_type_and_address_do_not_matter() {
        let a = calculate_insurance(dec!(250000), PropertyType::Site, dec!(120), "Cork");
        let b = calculate_insurance(dec!(2000000), PropertyType::Bungalow, dec!(120), "");
        assert_eq!(a, b);
        assert_eq!(a, dec!(360));
    }

    #[test]
    fn test_no_area_is_zero() {
        assert_eq!(
            calculate_insurance(dec!(400000), PropertyType::House, Decimal::ZERO, ""),
            Decimal::ZERO
        );
        assert_eq!(
            calculate_insurance(dec!(400000), PropertyType::House, dec!(-50), ""),
            Decimal::ZERO
        );
        let est = estimate_insurance(&InsurancePolicy::default(), None);
        assert_eq!(est.annual_premium, Decimal::ZERO);
    }

    #[test]
    fn test_premium_rounds_to_euro() {
        // 73.5 * 2000 * 0.0015 = 220.5 -> 221
        let est = estimate_insurance(&InsurancePolicy::default(), Some(dec!(73.5)));
        assert_eq!(est.reinstatement_cost, dec!(147000));
        assert_eq!(est.annual_premium, dec!(221));
    }

    #[test]
    fn test_huge_area_saturates() {
        let est = estimate_insurance(&InsurancePolicy::default(), Some(dec!(50000000000000000000000000)));
        assert_eq!(est.reinstatement_cost, Decimal::MAX);
        assert!(est.annual_premium > Decimal::ZERO);
    }
}
