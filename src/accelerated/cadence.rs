//! Payment cadence in whole weeks

use crate::error::{LoanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weeks in the year used for cadence conversion
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// How often a payment is made, in weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PaymentCadence {
    weeks_per_payment: u32,
}

impl PaymentCadence {
    /// Cadence of `weeks_per_payment` weeks; zero is rejected
    pub fn new(weeks_per_payment: u32) -> Result<Self> {
        if weeks_per_payment == 0 {
            return Err(LoanError::invalid("weeks_per_payment", "must be at least one week"));
        }
        Ok(Self { weeks_per_payment })
    }

    pub const fn weekly() -> Self {
        Self { weeks_per_payment: 1 }
    }

    pub const fn biweekly() -> Self {
        Self { weeks_per_payment: 2 }
    }

    pub fn weeks_per_payment(&self) -> u32 {
        self.weeks_per_payment
    }

    /// 52 / weeks; fractional for cadences that do not divide the year
    pub fn payments_per_year(&self) -> f64 {
        WEEKS_PER_YEAR / self.weeks_per_payment as f64
    }

    /// Days between consecutive payments
    pub fn days_between_payments(&self) -> u64 {
        7 * self.weeks_per_payment as u64
    }
}

impl TryFrom<u32> for PaymentCadence {
    type Error = LoanError;

    fn try_from(weeks: u32) -> Result<Self> {
        Self::new(weeks)
    }
}

impl From<PaymentCadence> for u32 {
    fn from(cadence: PaymentCadence) -> u32 {
        cadence.weeks_per_payment
    }
}

impl fmt::Display for PaymentCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weeks_per_payment {
            1 => write!(f, "weekly"),
            2 => write!(f, "biweekly"),
            n => write!(f, "every {n} weeks"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payments_per_year() {
        assert_eq!(PaymentCadence::weekly().payments_per_year(), 52.0);
        assert_eq!(PaymentCadence::biweekly().payments_per_year(), 26.0);
        assert_eq!(PaymentCadence::new(52).unwrap().payments_per_year(), 1.0);
    }

    #[test]
    fn test_zero_weeks_rejected() {
        assert!(PaymentCadence::new(0).is_err());
        assert!(serde_json::from_str::<PaymentCadence>("0").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PaymentCadence::weekly().to_string(), "weekly");
        assert_eq!(PaymentCadence::biweekly().to_string(), "biweekly");
        assert_eq!(PaymentCadence::new(3).unwrap().to_string(), "every 3 weeks");
    }

    #[test]
    fn test_serde_as_weeks() {
        let json = serde_json::to_string(&PaymentCadence::biweekly()).unwrap();
        assert_eq!(json, "2");
        let back: PaymentCadence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PaymentCadence::biweekly());
    }
}
