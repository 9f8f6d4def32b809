//! Policy tables that drive the calculations.
//!
//! The LPT bands, reinstatement rates and acquisition costs are jurisdiction-year
//! rules rather than derived logic, so they live here as data. `PolicyConfig::default()`
//! is the Irish 2026 ruleset; any field can be overridden from a JSON document.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropertyYieldError;
use crate::types::{Money, Percent, Rate};
use crate::PropertyYieldResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One fixed-charge LPT band: values up to and including `upper_bound` pay `charge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LptBand {
    pub upper_bound: Money,
    pub charge: Money,
}

/// A marginal-rate slice above the fixed-band threshold. `upper_bound: None` is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LptTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Money>,
    pub rate: Rate,
}

/// Local Property Tax schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LptSchedule {
    /// Ascending fixed-charge bands; the last band ends at `threshold`
    pub bands: Vec<LptBand>,
    /// Values strictly above this use `base_charge` plus the graduated tiers
    pub threshold: Money,
    /// Charge at the threshold before graduated slices are added
    pub base_charge: Money,
    /// Ascending marginal tiers starting at `threshold`
    pub tiers: Vec<LptTier>,
}

/// Reinstatement-cost insurance heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsurancePolicy {
    /// Rebuild cost per square metre
    pub reinstatement_rate_per_sq_meter: Money,
    /// Annual premium as a fraction of reinstatement cost
    pub premium_rate: Rate,
}

/// One-off acquisition costs added to the purchase price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionPolicy {
    pub stamp_duty_threshold: Money,
    pub stamp_duty_rate: Rate,
    pub stamp_duty_upper_rate: Rate,
    pub legal_fees: Money,
    pub survey_cost: Money,
}

/// Values used when a percent field is left blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    pub maintenance_reserve_percent: Percent,
    pub vacancy_rate: Percent,
    /// Vacancy above this draws a warning in the full analysis
    pub vacancy_warning_percent: Percent,
}

/// Perturbation sizes for the sensitivity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityShocks {
    /// Relative rent shift (0.10 = ±10%)
    pub rent_shift: Rate,
    /// Vacancy shift in percentage points
    pub vacancy_shift_points: Percent,
    /// Management fee shift in percentage points
    pub management_fee_shift_points: Percent,
}

/// Horizon and growth assumption for the cash-flow projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionPolicy {
    pub years: u32,
    pub cash_flow_growth: Rate,
}

/// Complete policy set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub lpt: LptSchedule,
    pub insurance: InsurancePolicy,
    pub acquisition: AcquisitionPolicy,
    pub defaults: AnalysisDefaults,
    pub sensitivity: SensitivityShocks,
    pub projection: ProjectionPolicy,
}

// ---------------------------------------------------------------------------
// Defaults (Irish ruleset)
// ---------------------------------------------------------------------------

impl Default for LptSchedule {
    fn default() -> Self {
        let bands = [
            (dec!(200000), dec!(90)),
            (dec!(262500), dec!(95)),
            (dec!(350000), dec!(206)),
            (dec!(437500), dec!(317)),
            (dec!(525000), dec!(428)),
            (dec!(612500), dec!(504)),
            (dec!(700000), dec!(580)),
            (dec!(787500), dec!(656)),
            (dec!(875000), dec!(732)),
            (dec!(962500), dec!(808)),
            (dec!(1050000), dec!(903)),
            (dec!(1137500), dec!(998)),
            (dec!(1225000), dec!(1094)),
            (dec!(1312500), dec!(1269)),
            (dec!(1400000), dec!(1444)),
            (dec!(1487500), dec!(1619)),
            (dec!(1575000), dec!(1797)),
            (dec!(1662500), dec!(2015)),
            (dec!(1750000), dec!(2233)),
            (dec!(2100000), dec!(3110)),
        ]
        .into_iter()
        .map(|(upper_bound, charge)| LptBand {
            upper_bound,
            charge,
        })
        .collect();

        LptSchedule {
            bands,
            threshold: dec!(2100000),
            base_charge: dec!(3147),
            tiers: vec![
                LptTier {
                    upper_bound: Some(dec!(2500000)),
                    rate: dec!(0.002),
                },
                LptTier {
                    upper_bound: None,
                    rate: dec!(0.0024),
                },
            ],
        }
    }
}

impl Default for InsurancePolicy {
    fn default() -> Self {
        InsurancePolicy {
            reinstatement_rate_per_sq_meter: dec!(2000),
            premium_rate: dec!(0.0015),
        }
    }
}

impl Default for AcquisitionPolicy {
    fn default() -> Self {
        AcquisitionPolicy {
            stamp_duty_threshold: dec!(1000000),
            stamp_duty_rate: dec!(0.01),
            stamp_duty_upper_rate: dec!(0.02),
            legal_fees: dec!(2500),
            survey_cost: dec!(500),
        }
    }
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        AnalysisDefaults {
            maintenance_reserve_percent: dec!(5),
            vacancy_rate: dec!(5),
            vacancy_warning_percent: dec!(15),
        }
    }
}

impl Default for SensitivityShocks {
    fn default() -> Self {
        SensitivityShocks {
            rent_shift: dec!(0.10),
            vacancy_shift_points: dec!(5),
            management_fee_shift_points: dec!(2),
        }
    }
}

impl Default for ProjectionPolicy {
    fn default() -> Self {
        ProjectionPolicy {
            years: 5,
            cash_flow_growth: dec!(0.03),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl PolicyConfig {
    /// Parse a (possibly partial) JSON policy document and validate it.
    pub fn from_json_str(json: &str) -> PropertyYieldResult<Self> {
        let policy: PolicyConfig = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check the structural rules every policy must satisfy.
    pub fn validate(&self) -> PropertyYieldResult<()> {
        self.lpt.validate()?;

        non_negative("insurance.reinstatement_rate_per_sq_meter", self.insurance.reinstatement_rate_per_sq_meter)?;
        non_negative("insurance.premium_rate", self.insurance.premium_rate)?;

        let acq = &self.acquisition;
        non_negative("acquisition.stamp_duty_threshold", acq.stamp_duty_threshold)?;
        non_negative("acquisition.stamp_duty_rate", acq.stamp_duty_rate)?;
        non_negative("acquisition.stamp_duty_upper_rate", acq.stamp_duty_upper_rate)?;
        non_negative("acquisition.legal_fees", acq.legal_fees)?;
        non_negative("acquisition.survey_cost", acq.survey_cost)?;

        non_negative("defaults.maintenance_reserve_percent", self.defaults.maintenance_reserve_percent)?;
        non_negative("defaults.vacancy_rate", self.defaults.vacancy_rate)?;
        non_negative("defaults.vacancy_warning_percent", self.defaults.vacancy_warning_percent)?;

        non_negative("sensitivity.rent_shift", self.sensitivity.rent_shift)?;
        if self.sensitivity.rent_shift >= Decimal::ONE {
            return Err(invalid("sensitivity.rent_shift", "Rent shift must be below 100%"));
        }
        non_negative("sensitivity.vacancy_shift_points", self.sensitivity.vacancy_shift_points)?;
        non_negative(
            "sensitivity.management_fee_shift_points",
            self.sensitivity.management_fee_shift_points,
        )?;

        if self.projection.cash_flow_growth <= dec!(-1) {
            return Err(invalid(
                "projection.cash_flow_growth",
                "Growth rate must be greater than -100%",
            ));
        }

        Ok(())
    }
}

impl LptSchedule {
    fn validate(&self) -> PropertyYieldResult<()> {
        if self.bands.is_empty() {
            return Err(invalid("lpt.bands", "At least one band is required"));
        }

        for (i, pair) in self.bands.windows(2).enumerate() {
            if pair[1].upper_bound <= pair[0].upper_bound {
                return Err(invalid(
                    &format!("lpt.bands[{}]", i + 1),
                    "Band upper bounds must be strictly ascending",
                ));
            }
            if pair[1].charge < pair[0].charge {
                return Err(invalid(
                    &format!("lpt.bands[{}]", i + 1),
                    "Band charges must not decrease",
                ));
            }
        }

        for (i, band) in self.bands.iter().enumerate() {
            non_negative(&format!("lpt.bands[{i}].charge"), band.charge)?;
        }

        // bands is non-empty, checked above
        let last = &self.bands[self.bands.len() - 1];
        if last.upper_bound != self.threshold {
            return Err(invalid(
                "lpt.threshold",
                "The last band must end exactly at the threshold",
            ));
        }
        if self.base_charge < last.charge {
            return Err(invalid(
                "lpt.base_charge",
                "Base charge must not be below the top band charge",
            ));
        }

        let mut floor = self.threshold;
        for (i, tier) in self.tiers.iter().enumerate() {
            non_negative(&format!("lpt.tiers[{i}].rate"), tier.rate)?;
            match tier.upper_bound {
                Some(upper) if upper <= floor => {
                    return Err(invalid(
                        &format!("lpt.tiers[{i}].upper_bound"),
                        "Tier bounds must ascend from the threshold",
                    ));
                }
                Some(upper) => floor = upper,
                None if i + 1 != self.tiers.len() => {
                    return Err(invalid(
                        &format!("lpt.tiers[{i}].upper_bound"),
                        "Only the last tier may be open-ended",
                    ));
                }
                None => {}
            }
        }

        Ok(())
    }
}

fn non_negative(field: &str, value: Decimal) -> PropertyYieldResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "Must not be negative"));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> PropertyYieldError {
    PropertyYieldError::InvalidPolicy {
        field: field.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(PolicyConfig::default().validate().is_ok());
        assert_eq!(PolicyConfig::default().lpt.bands.len(), 20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy =
            PolicyConfig::from_json_str(r#"{ "acquisition": { "legal_fees": "3000" } }"#).unwrap();
        assert_eq!(policy.acquisition.legal_fees, dec!(3000));
        assert_eq!(policy.acquisition.survey_cost, dec!(500));
        assert_eq!(policy.lpt, LptSchedule::default());
    }

    #[test]
    fn test_rejects_unsorted_bands() {
        let mut policy = PolicyConfig::default();
        policy.lpt.bands.swap(0, 1);
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("lpt.bands[1]"));
    }

    #[test]
    fn test_rejects_threshold_mismatch() {
        let mut policy = PolicyConfig::default();
        policy.lpt.threshold = dec!(2000000);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_rejects_open_tier_before_last() {
        let mut policy = PolicyConfig::default();
        policy.lpt.tiers.reverse();
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_rate() {
        let mut policy = PolicyConfig::default();
        policy.insurance.premium_rate = dec!(-0.001);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_vacancy_warning() {
        let mut policy = PolicyConfig::default();
        assert_eq!(policy.defaults.vacancy_warning_percent, dec!(15));
        policy.defaults.vacancy_warning_percent = dec!(-1);
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("defaults.vacancy_warning_percent"));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = PolicyConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, PropertyYieldError::SerializationError(_)));
    }
}
