//! Loan Amortization - Standard and accelerated payoff engine
//!
//! This library provides:
//! - Fixed-rate, fixed-term monthly amortization schedules
//! - Accelerated payoff scenarios: the same annual budget paid weekly, biweekly
//!   or on any whole-week cadence, with the interest saved against the monthly plan
//! - Batch comparisons across a loan book
//! - CSV/JSON export of schedules and comparison reports

pub mod error;
pub mod config;
pub mod loan;
pub mod amortization;
pub mod accelerated;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{LoanError, Result};
pub use config::{EngineConfig, BalanceRounding, ScheduleDating};
pub use loan::LoanTerms;
pub use amortization::{StandardEngine, StandardSchedule, ScheduleEntry};
pub use accelerated::{AcceleratedEngine, AcceleratedScenario, PaymentCadence};
pub use scenario::{ScenarioRunner, LoanComparison, ComparisonSummary};
