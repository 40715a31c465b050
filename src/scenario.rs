//! Scenario runner: one standard schedule compared against several cadences
//!
//! Engines are built once from the config and reused for every loan. Cadences
//! of a loan, and loans of a batch, are independent and run in parallel.

use crate::accelerated::{AcceleratedEngine, AcceleratedScenario, PaymentCadence};
use crate::amortization::{StandardEngine, StandardSchedule};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::loan::LoanTerms;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cadences compared by default
pub const DEFAULT_CADENCES: [PaymentCadence; 2] = [PaymentCadence::weekly(), PaymentCadence::biweekly()];

/// Standard schedule plus one accelerated scenario per requested cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparison {
    pub terms: LoanTerms,
    pub standard: StandardSchedule,
    /// In the order the cadences were requested
    pub scenarios: Vec<AcceleratedScenario>,
}

impl LoanComparison {
    /// Scenario with the largest saving
    pub fn best_scenario(&self) -> Option<&AcceleratedScenario> {
        self.scenarios
            .iter()
            .max_by(|a, b| a.interest_saved_vs_standard.total_cmp(&b.interest_saved_vs_standard))
    }

    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            principal: self.terms.principal,
            annual_rate_percent: self.terms.annual_rate_percent,
            term_years: self.terms.term_years,
            monthly_payment: self.standard.monthly_payment,
            standard_total_paid: self.standard.total_paid(),
            standard_total_interest: self.standard.total_interest(),
            final_balance: self.standard.final_balance(),
            cadences: self.scenarios.iter().map(CadenceSummary::from).collect(),
        }
    }
}

/// Scalar figures of a comparison, without the per-period series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    pub monthly_payment: f64,
    pub standard_total_paid: f64,
    pub standard_total_interest: f64,
    pub final_balance: f64,
    pub cadences: Vec<CadenceSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadenceSummary {
    pub weeks_per_payment: u32,
    pub label: String,
    pub payment_per_period: f64,
    pub estimated_period_count: f64,
    pub actual_period_count: u32,
    pub final_payment_date: NaiveDate,
    pub total_paid: f64,
    pub total_interest: f64,
    pub interest_saved: f64,
    pub years_saved: f64,
}

impl From<&AcceleratedScenario> for CadenceSummary {
    fn from(s: &AcceleratedScenario) -> Self {
        Self {
            weeks_per_payment: s.weeks_per_payment,
            label: s.cadence.to_string(),
            payment_per_period: s.payment_per_period,
            estimated_period_count: s.estimated_period_count,
            actual_period_count: s.actual_period_count,
            final_payment_date: s.final_payment_date,
            total_paid: s.total_paid,
            total_interest: s.total_interest,
            interest_saved: s.interest_saved_vs_standard,
            years_saved: s.years_saved,
        }
    }
}

/// Pre-configured runner for single loans and loan books
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: EngineConfig,
    standard: StandardEngine,
    accelerated: AcceleratedEngine,
}

impl ScenarioRunner {
    /// Runner with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            standard: StandardEngine::new(config.clone()),
            accelerated: AcceleratedEngine::new(config.clone()),
            config,
        }
    }

    /// Runner configured from a JSON file
    pub fn from_json_path(path: &Path) -> Result<Self> {
        Ok(Self::with_config(EngineConfig::from_json_path(path)?))
    }

    /// Standard schedule only
    pub fn standard(&self, terms: &LoanTerms) -> Result<StandardSchedule> {
        self.standard.amortize(terms)
    }

    /// Standard schedule and every cadence for one loan.
    /// The first failing cadence fails the whole comparison.
    pub fn run(&self, terms: &LoanTerms, cadences: &[PaymentCadence]) -> Result<LoanComparison> {
        let standard = self.standard.amortize(terms)?;

        let scenarios = cadences
            .par_iter()
            .map(|&cadence| self.accelerated.run(terms, &standard, cadence))
            .collect::<Result<Vec<_>>>()?;

        Ok(LoanComparison {
            terms: terms.clone(),
            standard,
            scenarios,
        })
    }

    /// Run every loan of a book; results line up with `loans`
    pub fn run_batch(&self, loans: &[LoanTerms], cadences: &[PaymentCadence]) -> Vec<Result<LoanComparison>> {
        loans.par_iter().map(|terms| self.run(terms, cadences)).collect()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
