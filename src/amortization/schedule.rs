//! Standard schedule output structures

use crate::config::BalanceRounding;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One monthly payment of the standard schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Payment number (1-indexed)
    pub index: u32,
    pub date: NaiveDate,
    pub payment: f64,
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub remaining_balance: f64,
}

/// Running totals up to and including an entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativeTotals {
    pub index: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
}

/// Advisory: the schedule did not end at zero within tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericalDrift {
    /// Balance left after the last entry
    pub residual: f64,
    /// |residual| / principal
    pub relative: f64,
    pub tolerance: f64,
}

/// Complete month-by-month amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardSchedule {
    pub principal: f64,
    pub monthly_payment: f64,
    /// Monthly rate (annual percent / 1200)
    pub periodic_rate: f64,
    pub payment_count: u32,
    /// Policy applied to the final balance
    pub rounding: BalanceRounding,
    /// Entries in payment order
    pub entries: Vec<ScheduleEntry>,
}

impl StandardSchedule {
    /// Total cash paid over the schedule (the standard total cost)
    pub fn total_paid(&self) -> f64 {
        self.entries.iter().map(|e| e.payment).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.entries.iter().map(|e| e.interest_portion).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.entries.iter().map(|e| e.principal_portion).sum()
    }

    /// Balance after the last entry; a small residue under `Preserve`
    pub fn final_balance(&self) -> f64 {
        self.entries
            .last()
            .map(|e| e.remaining_balance)
            .unwrap_or(self.principal)
    }

    /// Term in years implied by the payment count
    pub fn term_years(&self) -> f64 {
        self.payment_count as f64 / 12.0
    }

    /// Running totals per entry
    pub fn cumulative(&self) -> Vec<CumulativeTotals> {
        let mut paid = 0.0;
        let mut interest = 0.0;
        let mut principal = 0.0;
        self.entries
            .iter()
            .map(|e| {
                paid += e.payment;
                interest += e.interest_portion;
                principal += e.principal_portion;
                CumulativeTotals {
                    index: e.index,
                    total_paid: paid,
                    total_interest: interest,
                    total_principal: principal,
                }
            })
            .collect()
    }

    /// Report drift when the final balance exceeds `tolerance * principal`
    pub fn drift_warning(&self, tolerance: f64) -> Option<NumericalDrift> {
        let residual = self.final_balance();
        let relative = residual.abs() / self.principal;
        if relative > tolerance {
            Some(NumericalDrift {
                residual,
                relative,
                tolerance,
            })
        } else {
            None
        }
    }

    /// Apply a final-balance policy.
    ///
    /// `ZeroFinalBalance` moves the residue into the last entry's principal and
    /// payment, so `remaining_balance` of that entry is exactly 0.0. Every other
    /// entry is untouched.
    pub fn with_rounding(mut self, policy: BalanceRounding) -> Self {
        self.rounding = policy;
        if policy == BalanceRounding::ZeroFinalBalance {
            if let Some(last) = self.entries.last_mut() {
                let residue = last.remaining_balance;
                last.principal_portion += residue;
                last.payment += residue;
                last.remaining_balance = 0.0;
            }
        }
        self
    }
}
