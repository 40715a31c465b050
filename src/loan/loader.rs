//! Load a loan book from CSV
//!
//! Expected header: `principal,annual_rate_percent,term_years,start_date`
//! with ISO dates (`2024-01-31`).

use super::LoanTerms;
use crate::error::Result;
use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

/// Raw CSV row before validation
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
    start_date: NaiveDate,
}

impl CsvRow {
    fn into_terms(self) -> Result<LoanTerms> {
        LoanTerms::new(self.principal, self.annual_rate_percent, self.term_years, self.start_date)
    }
}

/// Load all loans from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanTerms>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load loans from any reader (e.g., string buffer, stdin)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanTerms>> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanTerms>> {
    let mut loans = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.into_terms()?);
    }
    log::debug!("loaded {} loans", loans.len());
    Ok(loans)
}
