//! Annuity payment and monthly schedule construction

use super::schedule::{ScheduleEntry, StandardSchedule};
use crate::config::{BalanceRounding, EngineConfig, ScheduleDating};
use crate::error::{LoanError, Result};
use crate::loan::{monthly_payment_count, LoanTerms};
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed monthly payment with the figures it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    pub payment: f64,
    pub monthly_rate: f64,
    pub payment_count: u32,
}

/// Compute the fixed monthly payment with the annuity formula.
///
/// payment = P * r * (1+r)^n / ((1+r)^n - 1), with r = annual% / 1200 and
/// n = years * 12. (1+r)^n - 1 is evaluated as expm1(n * ln1p(r)) so tiny
/// positive rates keep their precision. At r = 0 the payment is P / n.
pub fn compute_monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> Result<MonthlyPayment> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(LoanError::invalid("principal", format!("must be a positive amount, got {}", principal)));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(LoanError::invalid(
            "annual_rate_percent",
            format!("must be zero or positive, got {}", annual_rate_percent),
        ));
    }
    let payment_count = monthly_payment_count(term_years)?;

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let n = payment_count as f64;

    let payment = if monthly_rate == 0.0 {
        principal / n
    } else {
        let growth_m1 = (n * monthly_rate.ln_1p()).exp_m1();
        principal * monthly_rate * (growth_m1 + 1.0) / growth_m1
    };
    if !payment.is_finite() || payment <= 0.0 {
        return Err(LoanError::NonFinitePayment { value: payment });
    }

    Ok(MonthlyPayment {
        payment,
        monthly_rate,
        payment_count,
    })
}

/// Roll the balance forward one month at a time.
///
/// The final balance is not clamped: floating-point accumulation may leave a
/// small residue which is reported through [`StandardSchedule::drift_warning`].
pub fn build_schedule(
    principal: f64,
    payment: f64,
    monthly_rate: f64,
    payment_count: u32,
    start_date: NaiveDate,
    dating: ScheduleDating,
) -> Result<StandardSchedule> {
    let mut entries = Vec::with_capacity(payment_count as usize);
    let mut balance = principal;

    for i in 0..payment_count {
        let interest = balance * monthly_rate;
        let principal_portion = payment - interest;
        balance -= principal_portion;

        entries.push(ScheduleEntry {
            index: i + 1,
            date: schedule_date(start_date, i, dating)?,
            payment,
            interest_portion: interest,
            principal_portion,
            remaining_balance: balance,
        });
    }

    Ok(StandardSchedule {
        principal,
        monthly_payment: payment,
        periodic_rate: monthly_rate,
        payment_count,
        rounding: BalanceRounding::Preserve,
        entries,
    })
}

/// Date of the payment at zero-based `offset` from the start date
fn schedule_date(start: NaiveDate, offset: u32, dating: ScheduleDating) -> Result<NaiveDate> {
    let date = match dating {
        ScheduleDating::ThirtyDaySteps => start.checked_add_days(Days::new(30 * offset as u64)),
        ScheduleDating::CalendarMonths => start.checked_add_months(Months::new(offset)),
    };
    date.ok_or(LoanError::DateOutOfRange)
}

/// Standard amortization engine
#[derive(Debug, Clone, Default)]
pub struct StandardEngine {
    config: EngineConfig,
}

impl StandardEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Payment plus full schedule for a loan, with the configured rounding policy applied
    pub fn amortize(&self, terms: &LoanTerms) -> Result<StandardSchedule> {
        terms.validate()?;

        let monthly = compute_monthly_payment(terms.principal, terms.annual_rate_percent, terms.term_years)?;
        log::debug!(
            "monthly payment {:.4} at rate {:.6} over {} payments",
            monthly.payment,
            monthly.monthly_rate,
            monthly.payment_count
        );

        let schedule = build_schedule(
            terms.principal,
            monthly.payment,
            monthly.monthly_rate,
            monthly.payment_count,
            terms.start_date,
            self.config.schedule_dating,
        )?;

        if let Some(drift) = schedule.drift_warning(self.config.drift_tolerance) {
            log::warn!(
                "standard schedule ends with residual balance {:.6e} ({:.3e} of principal, tolerance {:.1e})",
                drift.residual,
                drift.relative,
                drift.tolerance
            );
        }

        Ok(schedule.with_rounding(self.config.balance_rounding))
    }
}
