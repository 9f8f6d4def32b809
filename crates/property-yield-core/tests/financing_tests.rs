use property_yield_core::financing::mortgage::{self, MortgageInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Mortgage payment
// ===========================================================================

#[test]
fn test_zero_rate_reference() {
    assert_eq!(
        mortgage::calculate_mortgage_payment(dec!(120000), Decimal::ZERO, dec!(10)),
        dec!(1000)
    );
}

#[test]
fn test_payment_rises_with_rate() {
    let mut previous = Decimal::ZERO;
    for rate in [dec!(0), dec!(1.5), dec!(3), dec!(4.5), dec!(6), dec!(8)] {
        let payment = mortgage::calculate_mortgage_payment(dec!(320000), rate, dec!(30));
        assert!(payment > previous, "{rate}%: {payment}");
        previous = payment;
    }
}

#[test]
fn test_payment_falls_with_term() {
    let short = mortgage::calculate_mortgage_payment(dec!(320000), dec!(4), dec!(20));
    let long = mortgage::calculate_mortgage_payment(dec!(320000), dec!(4), dec!(35));
    assert!(long < short);
}

#[test]
fn test_input_round_trips_through_json() {
    let input: MortgageInput = serde_json::from_str(
        r#"{ "principal": 250000, "annual_rate_percent": 4.0, "term_years": 25 }"#,
    )
    .unwrap();
    assert_eq!(mortgage::mortgage_payment(&input), dec!(1320));
}

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_schedule_amortizes_principal() {
    let principal = dec!(250000);
    let schedule = mortgage::amortization_schedule(principal, dec!(4.0), dec!(25));
    let repaid: Decimal = schedule.rows.iter().map(|r| r.principal).sum();
    assert_eq!(repaid, principal);

    // Rows pay the annuity rounded up to the cent, so the total stays within a
    // few euros of 300 exact payments.
    let exact_total = dec!(1319.5921) * dec!(300);
    assert!((schedule.total_paid - exact_total).abs() < dec!(50));
    assert_eq!(schedule.monthly_payment, dec!(1320));
}

#[test]
fn test_schedule_repays_high_rate_long_term_loan() {
    // Headline payment rounds down to the monthly interest; rows still amortize
    let schedule = mortgage::amortization_schedule(dec!(12000), dec!(20), dec!(40));
    assert_eq!(schedule.monthly_payment, dec!(200));
    let first = &schedule.rows[0];
    assert!(first.balance < dec!(12000));
    let last = schedule.rows.last().unwrap();
    assert_eq!(last.balance, Decimal::ZERO);
    assert!(last.payment <= first.payment);
}

#[test]
fn test_schedule_for_unrepresentable_term_is_empty() {
    let schedule = mortgage::amortization_schedule(dec!(100000), dec!(4), dec!(1000000000));
    assert!(schedule.rows.is_empty());
    assert_eq!(schedule.monthly_payment, Decimal::ZERO);
}

#[test]
fn test_schedule_balance_never_increases() {
    let schedule = mortgage::amortization_schedule(dec!(180000), dec!(3.75), dec!(20));
    assert!(schedule.rows.windows(2).all(|w| w[1].balance <= w[0].balance));
    assert_eq!(schedule.rows.first().map(|r| r.period), Some(1));
}
