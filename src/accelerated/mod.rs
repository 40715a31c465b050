//! Accelerated payoff: the same annual budget paid on a shorter cadence
//!
//! A closed-form estimate bounds the simulation and rejects unsolvable
//! cadence/budget combinations; the period-by-period simulation is what
//! determines the payoff date and total paid.

mod cadence;
mod rates;
mod engine;

pub use cadence::PaymentCadence;
pub use rates::{convert_rate, derive_payment_per_period, estimate_period_count};
pub use engine::{
    AcceleratedEngine, AcceleratedScenario, PayoffSimulation, PeriodEntry,
    simulate, compare_to_standard,
};
