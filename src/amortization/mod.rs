//! Standard fixed-rate, fixed-term monthly amortization

mod schedule;
mod standard;

pub use schedule::{ScheduleEntry, StandardSchedule, CumulativeTotals, NumericalDrift};
pub use standard::{StandardEngine, MonthlyPayment, compute_monthly_payment, build_schedule};
