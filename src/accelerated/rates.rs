//! Rate conversion, payment sizing and the closed-form period estimate

use super::cadence::PaymentCadence;
use crate::error::{LoanError, Result};

/// Periodic rate equivalent to an effective annual rate.
///
/// periodic = (1 + annual%/100)^(1/paymentsPerYear) - 1, so compounding the
/// periodic rate over a year reproduces the annual rate.
pub fn convert_rate(annual_rate_percent: f64, cadence: PaymentCadence) -> Result<f64> {
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(LoanError::invalid(
            "annual_rate_percent",
            format!("must be zero or positive, got {}", annual_rate_percent),
        ));
    }
    let exponent = 1.0 / cadence.payments_per_year();
    Ok((1.0 + annual_rate_percent / 100.0).powf(exponent) - 1.0)
}

/// Spread the annual outflow of a monthly budget evenly over the cadence's periods
pub fn derive_payment_per_period(monthly_budget: f64, cadence: PaymentCadence) -> Result<f64> {
    if !monthly_budget.is_finite() || monthly_budget <= 0.0 {
        return Err(LoanError::invalid(
            "monthly_budget",
            format!("must be a positive amount, got {}", monthly_budget),
        ));
    }
    Ok(monthly_budget * 12.0 / cadence.payments_per_year())
}

/// Closed-form number of periods to amortize `loan_amount`, before ceiling.
///
/// n = ln(pmt / (pmt - L*r)) / ln(1 + r). The payment must exceed the first
/// period's interest L*r or the logarithm is undefined; that case is reported
/// as an unsolvable schedule. At r = 0 the count is L / pmt.
pub fn estimate_period_count(loan_amount: f64, payment_per_period: f64, periodic_rate: f64) -> Result<f64> {
    if !loan_amount.is_finite() || loan_amount <= 0.0 {
        return Err(LoanError::invalid("loan_amount", format!("must be a positive amount, got {}", loan_amount)));
    }
    if !periodic_rate.is_finite() || periodic_rate < 0.0 {
        return Err(LoanError::invalid("periodic_rate", format!("must be zero or positive, got {}", periodic_rate)));
    }

    let interest_threshold = loan_amount * periodic_rate;
    if !payment_per_period.is_finite() || payment_per_period <= interest_threshold {
        return Err(LoanError::UnsolvableSchedule {
            cadence: None,
            payment_per_period,
            interest_threshold,
        });
    }

    let estimate = if periodic_rate == 0.0 {
        loan_amount / payment_per_period
    } else {
        (payment_per_period / (payment_per_period - interest_threshold)).ln() / periodic_rate.ln_1p()
    };

    if !estimate.is_finite() || estimate <= 0.0 {
        return Err(LoanError::NonFiniteEstimate { value: estimate });
    }
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_convert_rate_compounds_back_to_annual() {
        for weeks in [1, 2, 4, 13] {
            let cadence = PaymentCadence::new(weeks).unwrap();
            let rate = convert_rate(5.0, cadence).unwrap();
            let annual = (1.0 + rate).powf(cadence.payments_per_year()) - 1.0;
            assert_relative_eq!(annual, 0.05, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_convert_rate_is_not_pro_rata() {
        let weekly = convert_rate(5.0, PaymentCadence::weekly()).unwrap();
        assert!(weekly < 0.05 / 52.0);
        assert_eq!(convert_rate(0.0, PaymentCadence::weekly()).unwrap(), 0.0);
    }

    #[test]
    fn test_payment_per_period_keeps_annual_outflow() {
        let weekly = derive_payment_per_period(1073.64, PaymentCadence::weekly()).unwrap();
        assert_abs_diff_eq!(weekly, 247.76, epsilon = 0.005);

        let biweekly = derive_payment_per_period(1073.64, PaymentCadence::biweekly()).unwrap();
        assert_relative_eq!(biweekly * 26.0, 1073.64 * 12.0, max_relative = 1e-12);

        assert!(derive_payment_per_period(0.0, PaymentCadence::weekly()).is_err());
    }

    #[test]
    fn test_estimate_reference_weekly() {
        let rate = convert_rate(5.0, PaymentCadence::weekly()).unwrap();
        let payment = derive_payment_per_period(1073.64, PaymentCadence::weekly()).unwrap();
        let estimate = estimate_period_count(200_000.0, payment, rate).unwrap();

        assert!(estimate.is_finite());
        assert!(estimate > 0.0 && estimate < 360.0 * 52.0 / 12.0);
        assert_abs_diff_eq!(estimate, 1511.0, epsilon = 1.0);
    }

    #[test]
    fn test_estimate_overflow_is_reported() {
        // Subnormal rate: ln(1 + r) is so small the quotient overflows
        let err = estimate_period_count(1e308, 1e-10, 1e-322).unwrap_err();
        match err {
            LoanError::NonFiniteEstimate { value } => assert!(value.is_infinite()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_estimate_zero_rate() {
        assert_relative_eq!(estimate_period_count(10_000.0, 250.0, 0.0).unwrap(), 40.0);
    }

    #[test]
    fn test_estimate_rejects_interest_only_payment() {
        // 5% on 200k is 10k of interest in the first yearly period
        let err = estimate_period_count(200_000.0, 9_600.0, 0.05).unwrap_err();
        match err {
            LoanError::UnsolvableSchedule { cadence, payment_per_period, interest_threshold } => {
                assert!(cadence.is_none());
                assert_eq!(payment_per_period, 9_600.0);
                assert_relative_eq!(interest_threshold, 10_000.0);
            }
            other => panic!("unexpected error: {other}"),
        }

        // Exactly covering interest never amortizes either
        assert!(matches!(
            estimate_period_count(200_000.0, 10_000.0, 0.05),
            Err(LoanError::UnsolvableSchedule { .. })
        ));
    }
}
