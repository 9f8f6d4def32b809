use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::round_euro;
use crate::types::{Money, Percent, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Longest schedule produced: 100 years of monthly payments.
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan terms as entered in the mortgage calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub principal: Money,
    /// Annual nominal rate in percent (4.0 = 4%)
    pub annual_rate_percent: Percent,
    pub term_years: Decimal,
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Balance remaining after this payment
    pub balance: Money,
}

/// Month-by-month repayment of a loan at the rounded monthly payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub rows: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly payment for a fully amortizing loan, rounded to whole euros.
///
/// `M = P * r(1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and `n` the number
/// of monthly payments. A zero or negative rate repays the principal in equal
/// instalments. A non-positive principal or term gives a zero payment.
pub fn calculate_mortgage_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Decimal,
) -> Money {
    exact_payment(principal, annual_rate_percent, term_years)
        .map(round_euro)
        .unwrap_or(Decimal::ZERO)
}

/// Payment for a [`MortgageInput`].
pub fn mortgage_payment(input: &MortgageInput) -> Money {
    calculate_mortgage_payment(input.principal, input.annual_rate_percent, input.term_years)
}

/// Month-by-month repayment of `principal`.
///
/// `monthly_payment` is the whole-euro headline figure; the rows amortize at the
/// annuity payment rounded up to the cent, so the loan clears on or just before
/// the term and the last row pays the small remaining balance. Interest accrues
/// monthly on the outstanding balance, rounded to the cent.
///
/// The schedule is empty (all totals zero) when the payment would be zero or the
/// term runs past [`MAX_SCHEDULE_MONTHS`].
pub fn amortization_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Decimal,
) -> AmortizationSchedule {
    let mut schedule = AmortizationSchedule {
        monthly_payment: Decimal::ZERO,
        total_paid: Decimal::ZERO,
        total_interest: Decimal::ZERO,
        rows: Vec::new(),
    };

    let Some(exact) = exact_payment(principal, annual_rate_percent, term_years) else {
        return schedule;
    };
    let periods = match term_years.saturating_mul(MONTHS_PER_YEAR).ceil().to_u32() {
        Some(n) if n <= MAX_SCHEDULE_MONTHS => n,
        _ => {
            log::warn!("term of {term_years} years exceeds {MAX_SCHEDULE_MONTHS} months, no schedule built");
            return schedule;
        }
    };

    schedule.monthly_payment = round_euro(exact);
    let instalment = exact.round_dp_with_strategy(2, RoundingStrategy::AwayFromZero);
    let rate = if annual_rate_percent > Decimal::ZERO {
        monthly_rate(annual_rate_percent)
    } else {
        Decimal::ZERO
    };

    let mut balance = principal;
    for period in 1..=periods {
        let interest = balance.saturating_mul(rate).round_dp(2);
        let mut principal_part = instalment.saturating_sub(interest).max(Decimal::ZERO);
        if period == periods || principal_part >= balance {
            principal_part = balance;
        }
        balance -= principal_part;

        let payment = principal_part.saturating_add(interest);
        schedule.total_paid = schedule.total_paid.saturating_add(payment);
        schedule.total_interest = schedule.total_interest.saturating_add(interest);
        schedule.rows.push(AmortizationRow {
            period,
            payment,
            interest,
            principal: principal_part,
            balance,
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    schedule
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unrounded monthly payment, or `None` for a non-positive principal or term.
fn exact_payment(principal: Money, annual_rate_percent: Percent, term_years: Decimal) -> Option<Money> {
    if principal <= Decimal::ZERO || term_years <= Decimal::ZERO {
        return None;
    }

    let periods = term_years.saturating_mul(MONTHS_PER_YEAR);
    if annual_rate_percent <= Decimal::ZERO {
        return Some(principal / periods);
    }

    let payment = annuity_payment(principal, monthly_rate(annual_rate_percent), periods);
    log::debug!(
        "mortgage payment: principal {principal}, rate {annual_rate_percent}%, {periods} months -> {payment}"
    );
    Some(payment)
}

fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
}

/// Unrounded annuity payment; assumes `rate > 0` and `periods > 0`.
fn annuity_payment(principal: Money, rate: Rate, periods: Decimal) -> Money {
    let base = Decimal::ONE.saturating_add(rate);
    let growth = if periods.fract().is_zero() {
        periods.to_u64().and_then(|n| base.checked_powu(n))
    } else {
        base.checked_powd(periods)
    };

    // Beyond Decimal range the annuity factor has converged to the rate itself.
    let Some(growth) = growth else {
        return principal.saturating_mul(rate);
    };

    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return principal / periods;
    }

    rate.checked_mul(growth)
        .and_then(|numerator| numerator.checked_div(denominator))
        .and_then(|factor| principal.checked_mul(factor))
        .unwrap_or_else(|| principal.saturating_mul(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_payment() {
        // 250k @ 4% over 25 years = 1319.59 -> 1320
        assert_eq!(
            calculate_mortgage_payment(dec!(250000), dec!(4.0), dec!(25)),
            dec!(1320)
        );
        // 300k @ 3.5% over 30 years = 1347.13 -> 1347
        assert_eq!(
            calculate_mortgage_payment(dec!(300000), dec!(3.5), dec!(30)),
            dec!(1347)
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(
            calculate_mortgage_payment(dec!(120000), Decimal::ZERO, dec!(10)),
            dec!(1000)
        );
        assert_eq!(
            calculate_mortgage_payment(dec!(100000), dec!(-1), dec!(30)),
            dec!(278)
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(calculate_mortgage_payment(Decimal::ZERO, dec!(4), dec!(25)), Decimal::ZERO);
        assert_eq!(calculate_mortgage_payment(dec!(-5), dec!(4), dec!(25)), Decimal::ZERO);
        assert_eq!(calculate_mortgage_payment(dec!(250000), dec!(4), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_extreme_rate_does_not_overflow() {
        // (1 + 10)^480 is far outside Decimal range; payment tends to P * r
        let payment = calculate_mortgage_payment(dec!(100000), dec!(12000), dec!(40));
        assert_eq!(payment, dec!(1000000));
    }

    #[test]
    fn test_fractional_term() {
        let half_year = calculate_mortgage_payment(dec!(6000), dec!(6), dec!(0.5));
        // Six payments of ~1017.6
        assert_eq!(half_year, dec!(1018));
    }

    #[test]
    fn test_mortgage_input_payment() {
        let input = MortgageInput {
            principal: dec!(250000),
            annual_rate_percent: dec!(4),
            term_years: dec!(25),
        };
        assert_eq!(mortgage_payment(&input), dec!(1320));
    }

    #[test]
    fn test_schedule_repays_principal() {
        let schedule = amortization_schedule(dec!(250000), dec!(4.0), dec!(25));
        assert_eq!(schedule.monthly_payment, dec!(1320));
        assert_eq!(schedule.rows.len(), 300);

        let repaid: Decimal = schedule.rows.iter().map(|r| r.principal).sum();
        assert_eq!(repaid, dec!(250000));

        // Every row but the last pays the annuity rounded up to the cent
        let (last, rest) = schedule.rows.split_last().unwrap();
        assert!(rest.iter().all(|r| r.payment == dec!(1319.60)));
        assert_eq!(last.balance, Decimal::ZERO);
        assert!(last.payment > dec!(1300) && last.payment <= dec!(1319.60), "{}", last.payment);
        assert_eq!(schedule.total_paid, repaid + schedule.total_interest);
    }

    #[test]
    fn test_schedule_zero_rate() {
        let schedule = amortization_schedule(dec!(120000), Decimal::ZERO, dec!(10));
        assert_eq!(schedule.rows.len(), 120);
        assert_eq!(schedule.total_interest, Decimal::ZERO);
        assert!(schedule.rows.iter().all(|r| r.principal == dec!(1000)));
    }

    #[test]
    fn test_schedule_amortizes_when_euro_rounding_goes_down() {
        // The exact payment of 200.0717 rounds down to a 200 headline, which only
        // covers the 200.00 monthly interest; the rows still repay the loan.
        let schedule = amortization_schedule(dec!(12000), dec!(20), dec!(40));
        assert_eq!(schedule.monthly_payment, dec!(200));
        assert_eq!(schedule.rows[0].payment, dec!(200.08));
        assert!(schedule.rows[0].principal > Decimal::ZERO);
        assert!(schedule.rows.len() <= 480);

        let (last, rest) = schedule.rows.split_last().unwrap();
        assert!(rest.windows(2).all(|w| w[1].balance < w[0].balance));
        assert!(last.payment <= dec!(200.08), "{}", last.payment);
        assert_eq!(last.balance, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_empty_beyond_hundred_years() {
        let schedule = amortization_schedule(dec!(100000), dec!(4), dec!(1000000000));
        assert!(schedule.rows.is_empty());
        assert_eq!(schedule.monthly_payment, Decimal::ZERO);
        assert_eq!(schedule.total_paid, Decimal::ZERO);

        let longest = amortization_schedule(dec!(100000), dec!(4), dec!(100));
        assert_eq!(longest.rows.len(), MAX_SCHEDULE_MONTHS as usize);
    }

    #[test]
    fn test_schedule_empty_for_zero_payment() {
        let schedule = amortization_schedule(Decimal::ZERO, dec!(4), dec!(25));
        assert!(schedule.rows.is_empty());
        assert_eq!(schedule.total_paid, Decimal::ZERO);
    }
}
