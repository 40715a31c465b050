//! Period-by-period payoff simulation and comparison against the standard schedule

use super::cadence::PaymentCadence;
use super::rates::{convert_rate, derive_payment_per_period, estimate_period_count};
use crate::amortization::StandardSchedule;
use crate::config::EngineConfig;
use crate::error::{LoanError, Result};
use crate::loan::LoanTerms;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Relative slack on the final-period test. A debt that is a whole multiple of
/// the payment can land a few ulps above one payment after repeated subtraction.
const FINAL_PERIOD_SLACK: f64 = 1e-9;

/// One simulated payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// Period number (1-indexed)
    pub index: u32,
    pub date: NaiveDate,
    pub payment: f64,
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub remaining_debt: f64,
}

/// Outcome of [`simulate`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffSimulation {
    pub period_count: u32,
    pub final_payment_date: NaiveDate,
    /// Last installment, recomputed to clear the remaining debt exactly
    pub final_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    /// Always exactly 0.0 on success
    pub remaining_debt: f64,
    pub periods: Vec<PeriodEntry>,
}

/// Simulate repayment until the debt is cleared.
///
/// Each period accrues `debt * rate` of interest. Once the debt falls below one
/// payment the final installment is recomputed as `debt + interest`, leaving a
/// balance of exactly zero. Payment k falls `k * weeks` after `start_date`.
/// Fails with [`LoanError::IterationLimit`] if the debt is not cleared within
/// `max_periods`.
pub fn simulate(
    start_date: NaiveDate,
    loan_amount: f64,
    payment_per_period: f64,
    cadence: PaymentCadence,
    periodic_rate: f64,
    max_periods: usize,
) -> Result<PayoffSimulation> {
    if !loan_amount.is_finite() || loan_amount <= 0.0 {
        return Err(LoanError::invalid("loan_amount", format!("must be a positive amount, got {}", loan_amount)));
    }
    if !payment_per_period.is_finite() || payment_per_period <= 0.0 {
        return Err(LoanError::invalid(
            "payment_per_period",
            format!("must be a positive amount, got {}", payment_per_period),
        ));
    }

    let step = Days::new(cadence.days_between_payments());
    let mut remaining_debt = loan_amount;
    let mut current_date = start_date;
    let mut total_paid = 0.0;
    let mut total_interest = 0.0;
    let mut periods = Vec::with_capacity(max_periods.min(1 << 16));

    for index in 1..=max_periods {
        let interest = remaining_debt * periodic_rate;

        let (payment, principal_payment) = if remaining_debt < payment_per_period * (1.0 + FINAL_PERIOD_SLACK) {
            (remaining_debt + interest, remaining_debt)
        } else {
            (payment_per_period, payment_per_period - interest)
        };

        remaining_debt -= principal_payment;
        total_paid += payment;
        total_interest += interest;
        current_date = current_date.checked_add_days(step).ok_or(LoanError::DateOutOfRange)?;

        periods.push(PeriodEntry {
            index: index as u32,
            date: current_date,
            payment,
            interest_portion: interest,
            principal_portion: principal_payment,
            remaining_debt,
        });

        if remaining_debt <= 0.0 {
            return Ok(PayoffSimulation {
                period_count: index as u32,
                final_payment_date: current_date,
                final_payment: payment,
                total_paid,
                total_interest,
                remaining_debt,
                periods,
            });
        }
    }

    Err(LoanError::IterationLimit {
        limit: max_periods,
        remaining_debt,
    })
}

/// Result of paying a loan on a non-monthly cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceleratedScenario {
    pub cadence: PaymentCadence,
    pub weeks_per_payment: u32,
    pub payments_per_year: f64,
    /// Effective rate per period
    pub periodic_rate: f64,
    pub payment_per_period: f64,
    /// Closed-form count before ceiling
    pub estimated_period_count: f64,
    /// Simulated count, never above ceil(estimated_period_count)
    pub actual_period_count: u32,
    pub final_payment_date: NaiveDate,
    pub final_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    /// Standard total cost minus `total_paid`
    pub interest_saved_vs_standard: f64,
    /// Standard term minus the accelerated term, in years
    pub years_saved: f64,
    pub periods: Vec<PeriodEntry>,
}

impl AcceleratedScenario {
    /// Accelerated term in years
    pub fn term_years(&self) -> f64 {
        self.actual_period_count as f64 / self.payments_per_year
    }
}

/// Savings of a scenario against the standard schedule's total cost
pub fn compare_to_standard(scenario: &AcceleratedScenario, standard_total_cost: f64) -> f64 {
    standard_total_cost - scenario.total_paid
}

/// Accelerated payoff engine
#[derive(Debug, Clone, Default)]
pub struct AcceleratedEngine {
    config: EngineConfig,
}

impl AcceleratedEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Pay the standard monthly payment's annual total on `cadence`
    pub fn run(&self, terms: &LoanTerms, standard: &StandardSchedule, cadence: PaymentCadence) -> Result<AcceleratedScenario> {
        self.run_with_budget(terms, standard.monthly_payment, standard, cadence)
    }

    /// Pay an arbitrary monthly budget's annual total on `cadence`, compared
    /// against `standard`
    pub fn run_with_budget(
        &self,
        terms: &LoanTerms,
        monthly_budget: f64,
        standard: &StandardSchedule,
        cadence: PaymentCadence,
    ) -> Result<AcceleratedScenario> {
        terms.validate()?;

        let periodic_rate = convert_rate(terms.annual_rate_percent, cadence)?;
        let payment_per_period = derive_payment_per_period(monthly_budget, cadence)?;
        let estimated = estimate_period_count(terms.principal, payment_per_period, periodic_rate)
            .map_err(|e| e.with_cadence(cadence))?;

        let payments_per_year = cadence.payments_per_year();
        let bound = self.config.max_period_multiple * standard.payment_count as f64 * payments_per_year / 12.0;
        if estimated > bound {
            return Err(LoanError::PeriodBoundExceeded { estimated, bound });
        }

        log::debug!(
            "{}: periodic rate {:.8}, payment {:.4}, estimated {:.2} periods",
            cadence,
            periodic_rate,
            payment_per_period,
            estimated
        );

        let sim = simulate(
            terms.start_date,
            terms.principal,
            payment_per_period,
            cadence,
            periodic_rate,
            estimated.ceil() as usize,
        )?;

        let mut scenario = AcceleratedScenario {
            cadence,
            weeks_per_payment: cadence.weeks_per_payment(),
            payments_per_year,
            periodic_rate,
            payment_per_period,
            estimated_period_count: estimated,
            actual_period_count: sim.period_count,
            final_payment_date: sim.final_payment_date,
            final_payment: sim.final_payment,
            total_paid: sim.total_paid,
            total_interest: sim.total_interest,
            interest_saved_vs_standard: 0.0,
            years_saved: 0.0,
            periods: sim.periods,
        };
        scenario.interest_saved_vs_standard = compare_to_standard(&scenario, standard.total_paid());
        scenario.years_saved = standard.term_years() - scenario.term_years();

        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::StandardEngine;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn reference() -> (LoanTerms, StandardSchedule) {
        let terms = LoanTerms::new(200_000.0, 5.0, 30, start()).unwrap();
        let standard = StandardEngine::default().amortize(&terms).unwrap();
        (terms, standard)
    }

    #[test]
    fn test_reference_weekly_scenario() {
        let (terms, standard) = reference();
        let scenario = AcceleratedEngine::default().run(&terms, &standard, PaymentCadence::weekly()).unwrap();

        assert_eq!(scenario.payments_per_year, 52.0);
        assert_abs_diff_eq!(scenario.payment_per_period, 247.76, epsilon = 0.005);
        assert!(scenario.estimated_period_count.is_finite());
        assert!(scenario.estimated_period_count > 0.0);
        assert!(scenario.estimated_period_count < 360.0 * 52.0 / 12.0);
        assert!(scenario.total_interest < standard.total_interest());
        assert!(scenario.interest_saved_vs_standard > 0.0);
        assert!(scenario.years_saved > 0.0);
    }

    #[test]
    fn test_debt_ends_at_exact_zero() {
        let (terms, standard) = reference();
        for cadence in [PaymentCadence::weekly(), PaymentCadence::biweekly()] {
            let scenario = AcceleratedEngine::default().run(&terms, &standard, cadence).unwrap();
            let last = scenario.periods.last().unwrap();
            assert_eq!(last.remaining_debt, 0.0);
            assert!(last.payment <= scenario.payment_per_period * (1.0 + scenario.periodic_rate) * (1.0 + 1e-9));
            assert_eq!(scenario.periods.len() as u32, scenario.actual_period_count);
            assert_eq!(scenario.final_payment_date, last.date);
        }
    }

    #[test]
    fn test_actual_never_exceeds_ceiled_estimate() {
        let loans = [(200_000.0, 5.0, 30), (35_000.0, 7.25, 5), (500_000.0, 12.0, 40), (100_000.0, 1.0, 15), (10_000.0, 0.0, 2)];
        for (principal, rate, years) in loans {
            let terms = LoanTerms::new(principal, rate, years, start()).unwrap();
            let standard = StandardEngine::default().amortize(&terms).unwrap();
            for weeks in 1..=4 {
                let cadence = PaymentCadence::new(weeks).unwrap();
                let scenario = AcceleratedEngine::default().run(&terms, &standard, cadence).unwrap();
                assert!(scenario.actual_period_count as f64 <= scenario.estimated_period_count.ceil());
                assert_eq!(scenario.periods.last().unwrap().remaining_debt, 0.0);
            }
        }
    }

    #[test]
    fn test_savings_positive_for_sub_monthly_cadences() {
        let loans = [(200_000.0, 5.0, 30), (35_000.0, 7.25, 5), (100_000.0, 1.0, 15), (250_000.0, 0.5, 25)];
        for (principal, rate, years) in loans {
            let terms = LoanTerms::new(principal, rate, years, start()).unwrap();
            let standard = StandardEngine::default().amortize(&terms).unwrap();
            for weeks in 1..=4 {
                let cadence = PaymentCadence::new(weeks).unwrap();
                let scenario = AcceleratedEngine::default().run(&terms, &standard, cadence).unwrap();
                assert!(
                    compare_to_standard(&scenario, standard.total_paid()) > 0.0,
                    "{cadence} on {principal} at {rate}% saved nothing"
                );
            }
        }
    }

    #[test]
    fn test_low_budget_annual_cadence_is_unsolvable() {
        let (terms, standard) = reference();
        let cadence = PaymentCadence::new(52).unwrap();
        let err = AcceleratedEngine::default()
            .run_with_budget(&terms, 800.0, &standard, cadence)
            .unwrap_err();

        match err {
            LoanError::UnsolvableSchedule { cadence: Some(c), payment_per_period, interest_threshold } => {
                assert_eq!(c, cadence);
                assert_relative_eq!(payment_per_period, 9_600.0);
                assert_relative_eq!(interest_threshold, 10_000.0, max_relative = 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_near_threshold_budget_hits_period_bound() {
        let (terms, standard) = reference();
        // Solvable, but 1e-9 above the weekly interest-only payment needs ~22k weeks
        let weekly_rate = convert_rate(5.0, PaymentCadence::weekly()).unwrap();
        let interest_only_budget = 200_000.0 * weekly_rate * 52.0 / 12.0;
        let err = AcceleratedEngine::default()
            .run_with_budget(&terms, interest_only_budget * (1.0 + 1e-9), &standard, PaymentCadence::weekly())
            .unwrap_err();

        match err {
            LoanError::PeriodBoundExceeded { estimated, bound } => {
                assert_relative_eq!(bound, 10.0 * 360.0 * 52.0 / 12.0, max_relative = 1e-12);
                assert!(estimated.is_finite() && estimated > bound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_max_period_multiple_is_configurable() {
        let (terms, standard) = reference();
        // The weekly reference estimate is ~1511 periods against a 1560-week term
        let tight = AcceleratedEngine::new(EngineConfig {
            max_period_multiple: 0.5,
            ..Default::default()
        });
        assert!(matches!(
            tight.run(&terms, &standard, PaymentCadence::weekly()),
            Err(LoanError::PeriodBoundExceeded { .. })
        ));

        let exact = AcceleratedEngine::new(EngineConfig {
            max_period_multiple: 1.0,
            ..Default::default()
        });
        assert!(exact.run(&terms, &standard, PaymentCadence::weekly()).is_ok());
    }

    #[test]
    fn test_simulate_dates_and_final_payment() {
        // 1000 at 0% paid 300 every two weeks: 300, 300, 300, 100
        let sim = simulate(start(), 1000.0, 300.0, PaymentCadence::biweekly(), 0.0, 4).unwrap();
        assert_eq!(sim.period_count, 4);
        assert_eq!(sim.final_payment, 100.0);
        assert_eq!(sim.total_paid, 1000.0);
        assert_eq!(sim.remaining_debt, 0.0);
        assert_eq!(sim.periods[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(sim.final_payment_date, NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
    }

    #[test]
    fn test_simulate_whole_multiple_finishes_on_time() {
        let sim = simulate(start(), 1000.0, 100.0, PaymentCadence::weekly(), 0.0, 10).unwrap();
        assert_eq!(sim.period_count, 10);
        assert_eq!(sim.remaining_debt, 0.0);
    }

    #[test]
    fn test_simulate_reports_iteration_limit() {
        let err = simulate(start(), 1000.0, 100.0, PaymentCadence::weekly(), 0.0, 5).unwrap_err();
        match err {
            LoanError::IterationLimit { limit, remaining_debt } => {
                assert_eq!(limit, 5);
                assert_relative_eq!(remaining_debt, 500.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_final_period_covers_interest() {
        let sim = simulate(start(), 1000.0, 600.0, PaymentCadence::weekly(), 0.01, 2).unwrap();
        let last = sim.periods.last().unwrap();
        // 1000 -> 1000 + 10 - 600 = 410, then 410 + 4.10
        assert_relative_eq!(last.payment, 414.1, max_relative = 1e-12);
        assert_relative_eq!(sim.total_interest, 14.1, max_relative = 1e-12);
        assert_eq!(last.remaining_debt, 0.0);
    }
}
