//! Error taxonomy for the amortization engines

use crate::accelerated::PaymentCadence;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LoanError>;

#[derive(Debug, Error)]
pub enum LoanError {
    /// Rejected before any computation runs
    #[error("invalid input: {field} ({reason})")]
    InvalidInput { field: &'static str, reason: String },

    /// The per-period payment does not exceed the first period's interest,
    /// so the balance never amortizes
    #[error(
        "payment insufficient to cover interest{}: {payment_per_period:.2} per period does not exceed first-period interest {interest_threshold:.2}",
        cadence_suffix(.cadence)
    )]
    UnsolvableSchedule {
        cadence: Option<PaymentCadence>,
        payment_per_period: f64,
        interest_threshold: f64,
    },

    #[error("annuity payment is not finite ({value})")]
    NonFinitePayment { value: f64 },

    #[error("closed-form period estimate is not a finite positive count ({value})")]
    NonFiniteEstimate { value: f64 },

    #[error("estimated {estimated:.1} periods exceeds the bound of {bound:.1}")]
    PeriodBoundExceeded { estimated: f64, bound: f64 },

    #[error("simulation stopped after {limit} periods with {remaining_debt:.2} still owed")]
    IterationLimit { limit: usize, remaining_debt: f64 },

    #[error("payment date out of calendar range")]
    DateOutOfRange,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LoanError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Attach the offending cadence to an unsolvable-schedule error.
    /// Other variants pass through untouched.
    pub fn with_cadence(self, cadence: PaymentCadence) -> Self {
        match self {
            LoanError::UnsolvableSchedule {
                payment_per_period,
                interest_threshold,
                ..
            } => LoanError::UnsolvableSchedule {
                cadence: Some(cadence),
                payment_per_period,
                interest_threshold,
            },
            other => other,
        }
    }
}

fn cadence_suffix(cadence: &Option<PaymentCadence>) -> String {
    match cadence {
        Some(c) => format!(" ({})", c),
        None => String::new(),
    }
}
