//! Validated loan input

use crate::error::{LoanError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Longest accepted term; keeps schedule length and iteration counts bounded
pub const MAX_TERM_YEARS: u32 = 100;

/// Fixed-rate, fixed-term loan as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed (currency units)
    pub principal: f64,

    /// Annual rate in percent (5.0 means 5%); zero is the interest-free edge case
    pub annual_rate_percent: f64,

    /// Term in whole years
    pub term_years: u32,

    /// Date of the first scheduled payment
    pub start_date: NaiveDate,
}

impl LoanTerms {
    /// Build validated loan terms
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32, start_date: NaiveDate) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_years,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Check the invariants both engines rely on
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(LoanError::invalid(
                "principal",
                format!("must be a positive amount, got {}", self.principal),
            ));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(LoanError::invalid(
                "annual_rate_percent",
                format!("must be zero or positive, got {}", self.annual_rate_percent),
            ));
        }
        monthly_payment_count(self.term_years)?;
        Ok(())
    }

    /// Number of monthly payments over the full term
    pub fn payment_count(&self) -> Result<u32> {
        monthly_payment_count(self.term_years)
    }

    pub fn is_interest_free(&self) -> bool {
        self.annual_rate_percent == 0.0
    }
}

/// `term_years * 12`, rejecting zero and terms above [`MAX_TERM_YEARS`]
pub(crate) fn monthly_payment_count(term_years: u32) -> Result<u32> {
    if term_years == 0 {
        return Err(LoanError::invalid("term_years", "must be at least one year"));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(LoanError::invalid(
            "term_years",
            format!("must be at most {} years, got {}", MAX_TERM_YEARS, term_years),
        ));
    }
    term_years
        .checked_mul(12)
        .ok_or_else(|| LoanError::invalid("term_years", format!("{} years overflows the payment count", term_years)))
}
