//! Engine configuration
//!
//! All fields carry serde defaults so a partial JSON file (or `{}`) is a valid config.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default relative tolerance for the final standard-schedule balance
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 1e-6;

/// Default multiple of the standard term an accelerated estimate may reach
pub const DEFAULT_MAX_PERIOD_MULTIPLE: f64 = 10.0;

/// How the final balance of the standard schedule is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceRounding {
    /// Keep the floating-point residue left by the annuity formula
    #[default]
    Preserve,
    /// Fold the residue into the last entry so the balance ends at exactly zero
    ZeroFinalBalance,
}

/// How standard schedule entries are dated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleDating {
    /// Entry i falls on start + 30*i days
    #[default]
    ThirtyDaySteps,
    /// Entry i falls on start + i calendar months
    CalendarMonths,
}

/// Configuration shared by both engines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Residue tolerance as a fraction of principal before drift is reported
    pub drift_tolerance: f64,

    /// Accelerated estimates above this multiple of the standard term
    /// (in the cadence's own periods) are rejected
    pub max_period_multiple: f64,

    pub balance_rounding: BalanceRounding,

    pub schedule_dating: ScheduleDating,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
            max_period_multiple: DEFAULT_MAX_PERIOD_MULTIPLE,
            balance_rounding: BalanceRounding::Preserve,
            schedule_dating: ScheduleDating::ThirtyDaySteps,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
