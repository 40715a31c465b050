//! CSV and JSON writers for schedules and comparison reports

use crate::accelerated::AcceleratedScenario;
use crate::amortization::StandardSchedule;
use crate::error::Result;
use crate::scenario::ComparisonSummary;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ScheduleCsvRow {
    #[serde(rename = "Payment")]
    index: u32,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Payment Amount")]
    payment: f64,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Remaining Balance")]
    remaining_balance: f64,
}

/// Write the standard schedule, one row per month
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &StandardSchedule) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for e in &schedule.entries {
        csv.serialize(ScheduleCsvRow {
            index: e.index,
            date: e.date,
            payment: e.payment,
            principal: e.principal_portion,
            interest: e.interest_portion,
            remaining_balance: e.remaining_balance,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write an accelerated scenario's simulated periods, same columns as the schedule
pub fn write_periods_csv<W: Write>(writer: W, scenario: &AcceleratedScenario) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for p in &scenario.periods {
        csv.serialize(ScheduleCsvRow {
            index: p.index,
            date: p.date,
            payment: p.payment,
            principal: p.principal_portion,
            interest: p.interest_portion,
            remaining_balance: p.remaining_debt,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Pretty-printed JSON for one or more comparison summaries
pub fn write_summaries_json<W: Write>(writer: W, summaries: &[ComparisonSummary]) -> Result<()> {
    serde_json::to_writer_pretty(writer, summaries)?;
    Ok(())
}
