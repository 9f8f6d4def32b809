use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::numeric::percent_of;
use crate::policy::{AcquisitionPolicy, PolicyConfig};
use crate::property::{validate_input, FieldIssue, PropertyInput};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline return metrics for one property scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Annual gross rent / price, in percent
    pub gross_yield: Percent,
    /// Annual NOI / total investment, in percent
    pub net_yield: Percent,
    /// Annual cash flow after debt service / total investment, in percent
    pub cash_on_cash: Percent,
    pub annual_cash_flow: Money,
    pub monthly_cash_flow: Money,
    /// Price + closing costs + rehab
    pub total_investment: Money,
    /// Operating expenses plus debt service, per month
    pub monthly_expenses: Money,
    /// Annual NOI / price, in percent
    pub cap_rate: Percent,
}

/// Every intermediate figure behind an [`AnalysisResult`], annualised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiBreakdown {
    pub price: Money,
    pub stamp_duty: Money,
    pub legal_fees: Money,
    pub survey_cost: Money,
    pub closing_costs: Money,
    pub rehab_cost: Money,
    pub total_investment: Money,
    pub annual_gross_rent: Money,
    pub vacancy_loss: Money,
    pub property_tax_yearly: Money,
    pub insurance_yearly: Money,
    pub management_fee_yearly: Money,
    pub maintenance_yearly: Money,
    pub other_expenses_yearly: Money,
    pub total_operating_expenses: Money,
    pub annual_debt_service: Money,
    pub annual_noi: Money,
    pub annual_cash_flow: Money,
}

/// One month of income and outgoings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub gross_rent: Money,
    pub vacancy_loss: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub management_fee: Money,
    pub maintenance: Money,
    pub other_expenses: Money,
    pub mortgage: Money,
    /// Operating expenses plus mortgage
    pub total_expenses: Money,
    pub cash_flow: Money,
}

/// Full analysis of one property scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAnalysis {
    pub metrics: AnalysisResult,
    pub breakdown: RoiBreakdown,
    pub monthly: MonthlyBreakdown,
    pub issues: Vec<FieldIssue>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Return metrics under the default policy.
pub fn calculate_roi(input: &PropertyInput) -> AnalysisResult {
    calculate_roi_with(&PolicyConfig::default(), input)
}

/// Return metrics under `policy`. Never fails: blank fields resolve to zero (or
/// to the policy defaults for the maintenance and vacancy percentages) and every
/// ratio with a zero denominator is reported as zero.
pub fn calculate_roi_with(policy: &PolicyConfig, input: &PropertyInput) -> AnalysisResult {
    let breakdown = roi_breakdown(policy, input);
    metrics_from(&breakdown)
}

/// Annualised intermediate figures for `input`.
pub fn roi_breakdown(policy: &PolicyConfig, input: &PropertyInput) -> RoiBreakdown {
    let r = input.resolve(&policy.defaults);
    let acq = &policy.acquisition;

    // Fields are unbounded; sums and products saturate at the Decimal limits.
    // --- Acquisition ---
    let stamp_duty = stamp_duty(acq, r.price);
    let closing_costs = stamp_duty
        .saturating_add(acq.legal_fees)
        .saturating_add(acq.survey_cost);
    let total_investment = r.price.saturating_add(closing_costs).saturating_add(r.rehab_cost);

    // --- Income ---
    let annual_gross_rent = r.monthly_rent.saturating_mul(MONTHS_PER_YEAR);
    let share = |percent: Percent| annual_gross_rent.saturating_mul(percent / Decimal::ONE_HUNDRED);
    let vacancy_loss = share(r.vacancy_rate);

    // --- Operating expenses ---
    let management_fee_yearly = share(r.management_fee_percent);
    let maintenance_yearly = share(r.maintenance_reserve_percent);
    let total_operating_expenses = r
        .property_tax_yearly
        .saturating_add(r.insurance_yearly)
        .saturating_add(management_fee_yearly)
        .saturating_add(maintenance_yearly)
        .saturating_add(r.other_expenses_yearly);

    // --- Debt & returns ---
    let annual_debt_service = r.mortgage_monthly.saturating_mul(MONTHS_PER_YEAR);
    let annual_noi = annual_gross_rent
        .saturating_sub(vacancy_loss)
        .saturating_sub(total_operating_expenses);
    let annual_cash_flow = annual_noi.saturating_sub(annual_debt_service);

    log::debug!(
        "closing costs {closing_costs}, total investment {total_investment}, NOI {annual_noi}, cash flow {annual_cash_flow}"
    );

    RoiBreakdown {
        price: r.price,
        stamp_duty,
        legal_fees: acq.legal_fees,
        survey_cost: acq.survey_cost,
        closing_costs,
        rehab_cost: r.rehab_cost,
        total_investment,
        annual_gross_rent,
        vacancy_loss,
        property_tax_yearly: r.property_tax_yearly,
        insurance_yearly: r.insurance_yearly,
        management_fee_yearly,
        maintenance_yearly,
        other_expenses_yearly: r.other_expenses_yearly,
        total_operating_expenses,
        annual_debt_service,
        annual_noi,
        annual_cash_flow,
    }
}

/// Stamp duty: the base rate up to the threshold, the upper rate on the excess.
pub fn stamp_duty(policy: &AcquisitionPolicy, price: Money) -> Money {
    if price > policy.stamp_duty_threshold {
        let excess = price.saturating_sub(policy.stamp_duty_threshold);
        policy
            .stamp_duty_threshold
            .saturating_mul(policy.stamp_duty_rate)
            .saturating_add(excess.saturating_mul(policy.stamp_duty_upper_rate))
    } else {
        price.saturating_mul(policy.stamp_duty_rate)
    }
}

/// Analyse a property with the default policy, wrapped in a computation envelope.
pub fn analyze_property(input: &PropertyInput) -> ComputationOutput<PropertyAnalysis> {
    analyze_property_with(&PolicyConfig::default(), input)
}

/// Metrics, breakdowns and advisory field issues, plus warnings for results that
/// deserve a second look.
pub fn analyze_property_with(
    policy: &PolicyConfig,
    input: &PropertyInput,
) -> ComputationOutput<PropertyAnalysis> {
    let start = Instant::now();

    let issues = validate_input(input);
    let mut warnings: Vec<String> = issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect();

    let breakdown = roi_breakdown(policy, input);
    let metrics = metrics_from(&breakdown);
    let monthly = monthly_from(&breakdown);

    if breakdown.price.is_zero() {
        warnings.push("Purchase price is blank; gross yield and cap rate are reported as 0".into());
    }
    if metrics.annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative cash flow of {} per month after debt service",
            metrics.monthly_cash_flow.round_dp(2)
        ));
    }
    let vacancy = input.resolve(&policy.defaults).vacancy_rate;
    if vacancy > policy.defaults.vacancy_warning_percent {
        warnings.push(format!(
            "Vacancy rate {vacancy}% exceeds {}%, above typical market norms",
            policy.defaults.vacancy_warning_percent.normalize()
        ));
    }

    let output = PropertyAnalysis {
        metrics,
        breakdown,
        monthly,
        issues,
    };

    with_metadata(
        "Rental Property Return Analysis (cash basis)",
        &serde_json::json!({
            "acquisition": policy.acquisition,
            "defaults": policy.defaults,
        }),
        warnings,
        start,
        output,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn metrics_from(b: &RoiBreakdown) -> AnalysisResult {
    let annual_outgoings = b.total_operating_expenses.saturating_add(b.annual_debt_service);

    AnalysisResult {
        gross_yield: percent_of(b.annual_gross_rent, b.price),
        net_yield: percent_of(b.annual_noi, b.total_investment),
        cash_on_cash: percent_of(b.annual_cash_flow, b.total_investment),
        annual_cash_flow: b.annual_cash_flow,
        monthly_cash_flow: b.annual_cash_flow / MONTHS_PER_YEAR,
        total_investment: b.total_investment,
        monthly_expenses: annual_outgoings / MONTHS_PER_YEAR,
        cap_rate: percent_of(b.annual_noi, b.price),
    }
}

fn monthly_from(b: &RoiBreakdown) -> MonthlyBreakdown {
    let per_month = |annual: Money| annual / MONTHS_PER_YEAR;
    MonthlyBreakdown {
        gross_rent: per_month(b.annual_gross_rent),
        vacancy_loss: per_month(b.vacancy_loss),
        property_tax: per_month(b.property_tax_yearly),
        insurance: per_month(b.insurance_yearly),
        management_fee: per_month(b.management_fee_yearly),
        maintenance: per_month(b.maintenance_yearly),
        other_expenses: per_month(b.other_expenses_yearly),
        mortgage: per_month(b.annual_debt_service),
        total_expenses: per_month(b.total_operating_expenses.saturating_add(b.annual_debt_service)),
        cash_flow: per_month(b.annual_cash_flow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Three-bed semi let through an agent, financed with a 1,000/month mortgage.
    fn sample_input() -> PropertyInput {
        PropertyInput {
            address: "14 Harbour View, Cobh".into(),
            price: Some(dec!(300000)),
            monthly_rent: Some(dec!(1500)),
            rehab_cost: Some(Decimal::ZERO),
            property_tax_yearly: Some(dec!(400)),
            insurance_yearly: Some(dec!(450)),
            management_fee_percent: Some(dec!(10)),
            mortgage_monthly: Some(dec!(1000)),
            maintenance_reserve_percent: Some(dec!(5)),
            vacancy_rate: Some(dec!(5)),
            ..Default::default()
        }
    }

    #[test]
    fn test_breakdown_of_worked_example() {
        let b = roi_breakdown(&PolicyConfig::default(), &sample_input());

        assert_eq!(b.stamp_duty, dec!(3000));
        assert_eq!(b.closing_costs, dec!(6000));
        assert_eq!(b.total_investment, dec!(306000));
        assert_eq!(b.annual_gross_rent, dec!(18000));
        assert_eq!(b.vacancy_loss, dec!(900));
        assert_eq!(b.management_fee_yearly, dec!(1800));
        assert_eq!(b.maintenance_yearly, dec!(900));
        assert_eq!(b.total_operating_expenses, dec!(3550));
        assert_eq!(b.annual_noi, dec!(13550));
        assert_eq!(b.annual_debt_service, dec!(12000));
        assert_eq!(b.annual_cash_flow, dec!(1550));
    }

    #[test]
    fn test_metrics_of_worked_example() {
        let m = calculate_roi(&sample_input());

        assert_eq!(m.gross_yield, dec!(6));
        assert_eq!(m.total_investment, dec!(306000));
        assert_eq!(m.net_yield.round_dp(2), dec!(4.43));
        assert_eq!(m.cash_on_cash.round_dp(2), dec!(0.51));
        // 13550 / 300000
        assert_eq!(m.cap_rate.round_dp(4), dec!(4.5167));
        assert_eq!(m.annual_cash_flow, dec!(1550));
        assert_eq!(m.monthly_cash_flow.round_dp(2), dec!(129.17));
        // (3550 + 12000) / 12
        assert_eq!(m.monthly_expenses.round_dp(2), dec!(1295.83));
    }

    #[test]
    fn test_stamp_duty_upper_rate() {
        let acq = AcquisitionPolicy::default();
        assert_eq!(stamp_duty(&acq, dec!(1000000)), dec!(10000));
        // 10000 + 500000 * 0.02
        assert_eq!(stamp_duty(&acq, dec!(1500000)), dec!(20000));
        assert_eq!(stamp_duty(&acq, dec!(250000)), dec!(2500));
    }

    #[test]
    fn test_empty_record_is_zero_safe() {
        let m = calculate_roi(&PropertyInput::default());
        assert_eq!(m.gross_yield, Decimal::ZERO);
        assert_eq!(m.net_yield, Decimal::ZERO);
        assert_eq!(m.cash_on_cash, Decimal::ZERO);
        assert_eq!(m.cap_rate, Decimal::ZERO);
        assert_eq!(m.annual_cash_flow, Decimal::ZERO);
        // Legal fees and survey are charged regardless of price
        assert_eq!(m.total_investment, dec!(3000));
    }

    #[test]
    fn test_zero_total_investment_guard() {
        let mut policy = PolicyConfig::default();
        policy.acquisition.legal_fees = Decimal::ZERO;
        policy.acquisition.survey_cost = Decimal::ZERO;
        let input = PropertyInput {
            monthly_rent: Some(dec!(1000)),
            ..Default::default()
        };
        let m = calculate_roi_with(&policy, &input);
        assert_eq!(m.total_investment, Decimal::ZERO);
        assert_eq!(m.net_yield, Decimal::ZERO);
        assert_eq!(m.cash_on_cash, Decimal::ZERO);
        assert_eq!(m.gross_yield, Decimal::ZERO);
        // Rent still flows through
        assert!(m.annual_cash_flow > Decimal::ZERO);
    }

    #[test]
    fn test_blank_percentages_default_to_five() {
        let mut input = sample_input();
        input.vacancy_rate = None;
        input.maintenance_reserve_percent = None;
        assert_eq!(calculate_roi(&input), calculate_roi(&sample_input()));

        input.vacancy_rate = Some(Decimal::ZERO);
        let b = roi_breakdown(&PolicyConfig::default(), &input);
        assert_eq!(b.vacancy_loss, Decimal::ZERO);
    }

    #[test]
    fn test_debt_service_excluded_from_noi() {
        let mut input = sample_input();
        input.mortgage_monthly = Some(dec!(2500));
        let m = calculate_roi(&input);
        let base = calculate_roi(&sample_input());
        assert_eq!(m.net_yield, base.net_yield);
        assert_eq!(m.cap_rate, base.cap_rate);
        assert!(m.annual_cash_flow < Decimal::ZERO);
    }

    #[test]
    fn test_analyze_property_envelope() {
        let out = analyze_property(&sample_input());
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert_eq!(out.result.metrics, calculate_roi(&sample_input()));
        assert_eq!(out.result.monthly.gross_rent, dec!(1500));
        assert_eq!(out.result.monthly.mortgage, dec!(1000));
        assert_eq!(out.result.monthly.cash_flow.round_dp(2), dec!(129.17));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_analyze_property_warnings() {
        let input = PropertyInput {
            monthly_rent: Some(dec!(-10)),
            mortgage_monthly: Some(dec!(800)),
            vacancy_rate: Some(dec!(20)),
            ..Default::default()
        };
        let out = analyze_property(&input);
        assert_eq!(out.result.issues.len(), 1);
        assert!(out.warnings.iter().any(|w| w.contains("Rent cannot be negative")));
        assert!(out.warnings.iter().any(|w| w.contains("Purchase price is blank")));
        assert!(out.warnings.iter().any(|w| w.contains("Negative cash flow")));
        assert!(out.warnings.iter().any(|w| w.contains("exceeds 15%")));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let value = serde_json::to_value(calculate_roi(&sample_input())).unwrap();
        assert!(value.get("grossYield").is_some());
        assert!(value.get("cashOnCash").is_some());
        assert!(value.get("monthlyExpenses").is_some());
    }
}
