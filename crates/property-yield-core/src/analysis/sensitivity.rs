use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::roi::calculate_roi_with;
use crate::policy::PolicyConfig;
use crate::property::PropertyInput;
use crate::types::Percent;

/// One bar of a tornado chart: net yield at baseline and under each perturbation.
///
/// `adverse_scenario_yield` is always the scenario that hurts the investor (less
/// rent, more vacancy, higher fees) and `favorable_scenario_yield` the one that
/// helps, whichever is numerically larger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityItem {
    pub variable: String,
    pub base: Percent,
    pub adverse_scenario_yield: Percent,
    pub favorable_scenario_yield: Percent,
}

impl SensitivityItem {
    /// Distance between the two scenarios, used to rank variables by impact.
    pub fn swing(&self) -> Percent {
        self.favorable_scenario_yield.saturating_sub(self.adverse_scenario_yield).abs()
    }

    pub fn worst_case(&self) -> Percent {
        self.adverse_scenario_yield.min(self.favorable_scenario_yield)
    }

    pub fn best_case(&self) -> Percent {
        self.adverse_scenario_yield.max(self.favorable_scenario_yield)
    }
}

/// Sensitivity report under the default policy.
pub fn calculate_sensitivity(input: &PropertyInput) -> Vec<SensitivityItem> {
    calculate_sensitivity_with(&PolicyConfig::default(), input)
}

/// Net-yield response to rent, vacancy and management fee shocks, in that order.
///
/// Rent moves by a relative share; vacancy and fee move by percentage points and
/// never below zero. Blank fields resolve the same way as in the ROI analysis, so a
/// blank vacancy rate starts from the policy default.
pub fn calculate_sensitivity_with(policy: &PolicyConfig, input: &PropertyInput) -> Vec<SensitivityItem> {
    let shocks = &policy.sensitivity;
    let resolved = input.resolve(&policy.defaults);
    let base = calculate_roi_with(policy, input).net_yield;

    let rent = resolved.monthly_rent;
    let rent_item = SensitivityItem {
        variable: format!("Rent ±{}%", display_points(shocks.rent_shift.saturating_mul(Decimal::ONE_HUNDRED))),
        base,
        adverse_scenario_yield: scenario_yield(policy, input, |s| {
            s.monthly_rent = Some(rent.saturating_mul(Decimal::ONE.saturating_sub(shocks.rent_shift)))
        }),
        favorable_scenario_yield: scenario_yield(policy, input, |s| {
            s.monthly_rent = Some(rent.saturating_mul(Decimal::ONE.saturating_add(shocks.rent_shift)))
        }),
    };

    let vacancy = resolved.vacancy_rate;
    let vacancy_item = SensitivityItem {
        variable: format!("Vacancy ±{}%", display_points(shocks.vacancy_shift_points)),
        base,
        adverse_scenario_yield: scenario_yield(policy, input, |s| {
            s.vacancy_rate = Some(vacancy.saturating_add(shocks.vacancy_shift_points))
        }),
        favorable_scenario_yield: scenario_yield(policy, input, |s| {
            s.vacancy_rate = Some(vacancy.saturating_sub(shocks.vacancy_shift_points).max(Decimal::ZERO))
        }),
    };

    let fee = resolved.management_fee_percent;
    let fee_item = SensitivityItem {
        variable: format!(
            "Management Fee ±{}%",
            display_points(shocks.management_fee_shift_points)
        ),
        base,
        adverse_scenario_yield: scenario_yield(policy, input, |s| {
            s.management_fee_percent = Some(fee.saturating_add(shocks.management_fee_shift_points))
        }),
        favorable_scenario_yield: scenario_yield(policy, input, |s| {
            s.management_fee_percent = Some(fee.saturating_sub(shocks.management_fee_shift_points).max(Decimal::ZERO))
        }),
    };

    let items = vec![rent_item, vacancy_item, fee_item];
    for item in &items {
        log::debug!(
            "{}: adverse {} / base {} / favorable {}",
            item.variable,
            item.adverse_scenario_yield,
            item.base,
            item.favorable_scenario_yield
        );
    }
    items
}

fn scenario_yield(
    policy: &PolicyConfig,
    input: &PropertyInput,
    edit: impl FnOnce(&mut PropertyInput),
) -> Percent {
    let mut scenario = input.clone();
    edit(&mut scenario);
    calculate_roi_with(policy, &scenario).net_yield
}

fn display_points(value: Decimal) -> Decimal {
    value.normalize()
}
