use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::analysis::roi::AnalysisResult;
use crate::policy::ProjectionPolicy;
use crate::types::Money;

/// One year of the simple cash-flow outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    pub year: u32,
    pub label: String,
    /// Year-one cash flow grown at the projection rate
    pub cash_flow: Money,
    /// Total investment plus `year` times the year-one cash flow
    pub equity: Money,
}

/// Project with the default five-year, 3% growth assumption.
pub fn project_cash_flows(analysis: &AnalysisResult) -> Vec<ProjectionYear> {
    project_cash_flows_with(&ProjectionPolicy::default(), analysis)
}

/// Year-by-year outlook: cash flow compounds from year one; the equity figure
/// accumulates the ungrown year-one cash flow on top of the total investment.
pub fn project_cash_flows_with(policy: &ProjectionPolicy, analysis: &AnalysisResult) -> Vec<ProjectionYear> {
    let growth = Decimal::ONE.saturating_add(policy.cash_flow_growth);
    let mut years = Vec::with_capacity(policy.years as usize);

    for year in 1..=policy.years {
        let Some(factor) = growth.checked_powu(u64::from(year - 1)) else {
            log::warn!("cash-flow projection overflowed at year {year}, truncating");
            break;
        };
        let Some(cash_flow) = analysis.annual_cash_flow.checked_mul(factor) else {
            log::warn!("cash-flow projection overflowed at year {year}, truncating");
            break;
        };
        years.push(ProjectionYear {
            year,
            label: format!("Year {year}"),
            cash_flow,
            equity: analysis
                .total_investment
                .saturating_add(analysis.annual_cash_flow.saturating_mul(Decimal::from(year))),
        });
    }

    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            gross_yield: dec!(6),
            net_yield: dec!(4.43),
            cash_on_cash: dec!(0.51),
            annual_cash_flow: dec!(1550),
            monthly_cash_flow: dec!(129.17),
            total_investment: dec!(306000),
            monthly_expenses: dec!(1295.83),
            cap_rate: dec!(4.52),
        }
    }

    #[test]
    fn test_five_year_outlook() {
        let years = project_cash_flows(&sample_analysis());
        assert_eq!(years.len(), 5);
        assert_eq!(years[0].label, "Year 1");
        assert_eq!(years[0].cash_flow, dec!(1550));
        assert_eq!(years[1].cash_flow, dec!(1596.50));
        assert_eq!(years[0].equity, dec!(307550));
        assert_eq!(years[4].equity, dec!(313750));
    }

    #[test]
    fn test_negative_cash_flow_erodes_equity() {
        let mut analysis = sample_analysis();
        analysis.annual_cash_flow = dec!(-1200);
        let years = project_cash_flows(&analysis);
        assert!(years.windows(2).all(|w| w[1].equity < w[0].equity));
        assert!(years[4].cash_flow < years[0].cash_flow);
    }

    #[test]
    fn test_zero_years() {
        let policy = ProjectionPolicy {
            years: 0,
            cash_flow_growth: dec!(0.03),
        };
        assert!(project_cash_flows_with(&policy, &sample_analysis()).is_empty());
    }
}
