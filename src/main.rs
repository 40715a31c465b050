//! Loan Amortization CLI
//!
//! Standard monthly schedule compared against weekly/biweekly payoff

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use loan_amortization::{
    export,
    loan::load_loans,
    scenario::DEFAULT_CADENCES,
    EngineConfig, LoanComparison, LoanTerms, PaymentCadence, ScenarioRunner,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loan_amortization", version, about = "Standard and accelerated loan amortization")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the monthly plan against accelerated cadences
    Compare {
        #[command(flatten)]
        loan: LoanArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the full schedule (and optionally one accelerated table) as CSV
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,

        /// Output path for the standard schedule
        #[arg(long, default_value = "amortization_schedule.csv")]
        output: PathBuf,

        /// Also write the periods of this cadence to `<output stem>_<weeks>w.csv`
        #[arg(long)]
        accelerated: Option<u32>,
    },
    /// Compare every loan of a CSV loan book
    Batch {
        /// CSV with principal,annual_rate_percent,term_years,start_date
        #[arg(long)]
        input: PathBuf,

        /// Weeks per payment (repeatable, default 1 and 2)
        #[arg(long = "cadence")]
        cadences: Vec<u32>,

        /// Output path for the JSON summaries
        #[arg(long, default_value = "loan_comparison.json")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct LoanArgs {
    /// Loan amount
    #[arg(long, default_value_t = 200_000.0)]
    principal: f64,

    /// Annual interest rate in percent
    #[arg(long, default_value_t = 5.0)]
    rate: f64,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    years: u32,

    /// First payment date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Weeks per payment (repeatable, default 1 and 2)
    #[arg(long = "cadence")]
    cadences: Vec<u32>,
}

impl LoanArgs {
    fn terms(&self) -> Result<LoanTerms> {
        let start = self.start_date.unwrap_or_else(|| Local::now().date_naive());
        Ok(LoanTerms::new(self.principal, self.rate, self.years, start)?)
    }

    fn cadences(&self) -> Result<Vec<PaymentCadence>> {
        parse_cadences(&self.cadences)
    }
}

fn parse_cadences(weeks: &[u32]) -> Result<Vec<PaymentCadence>> {
    if weeks.is_empty() {
        return Ok(DEFAULT_CADENCES.to_vec());
    }
    weeks
        .iter()
        .map(|&w| PaymentCadence::new(w).with_context(|| format!("invalid cadence {w}")))
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let runner = ScenarioRunner::with_config(config);

    match cli.command {
        Commands::Compare { loan, json } => {
            let comparison = runner.run(&loan.terms()?, &loan.cadences()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison.summary())?);
            } else {
                print_comparison(&comparison);
            }
        }
        Commands::Schedule { loan, output, accelerated } => {
            let terms = loan.terms()?;
            let cadences = match accelerated {
                Some(w) => vec![PaymentCadence::new(w)?],
                None => Vec::new(),
            };
            let comparison = runner.run(&terms, &cadences)?;

            let file = File::create(&output).with_context(|| format!("unable to create {}", output.display()))?;
            export::write_schedule_csv(BufWriter::new(file), &comparison.standard)?;
            println!("Schedule written to: {}", output.display());

            if let Some(scenario) = comparison.scenarios.first() {
                let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("schedule");
                let path = output.with_file_name(format!("{}_{}w.csv", stem, scenario.weeks_per_payment));
                let file = File::create(&path).with_context(|| format!("unable to create {}", path.display()))?;
                export::write_periods_csv(BufWriter::new(file), scenario)?;
                println!("{} periods written to: {}", scenario.cadence, path.display());
            }
        }
        Commands::Batch { input, cadences, output } => {
            let loans = load_loans(&input).with_context(|| format!("failed to load loans from {}", input.display()))?;
            println!("Loaded {} loans", loans.len());

            let cadences = parse_cadences(&cadences)?;
            let mut summaries = Vec::with_capacity(loans.len());
            for (i, result) in runner.run_batch(&loans, &cadences).into_iter().enumerate() {
                match result {
                    Ok(comparison) => summaries.push(comparison.summary()),
                    Err(e) => eprintln!("  loan {} skipped: {}", i + 1, e),
                }
            }

            let file = File::create(&output).with_context(|| format!("unable to create {}", output.display()))?;
            export::write_summaries_json(BufWriter::new(file), &summaries)?;
            println!("{} comparisons written to: {}", summaries.len(), output.display());
        }
    }

    Ok(())
}

fn print_comparison(comparison: &LoanComparison) {
    let terms = &comparison.terms;
    let standard = &comparison.standard;

    println!(
        "Loan: ${:.2} at {:.2}% over {} years",
        terms.principal, terms.annual_rate_percent, terms.term_years
    );
    println!("  Monthly Payment: ${:.2}", standard.monthly_payment);
    println!("  Payment total:   ${:.2}", standard.total_paid());
    println!("  Total interest:  ${:.2}", standard.total_interest());
    println!();

    println!(
        "{:>16} {:>12} {:>8} {:>12} {:>14} {:>12} {:>8}",
        "Cadence", "Payment", "Periods", "Payoff", "Total Paid", "Saved", "Years"
    );
    println!("{}", "-".repeat(90));
    for s in &comparison.scenarios {
        println!(
            "{:>16} {:>12.2} {:>8} {:>12} {:>14.2} {:>12.2} {:>8.2}",
            s.cadence.to_string(),
            s.payment_per_period,
            s.actual_period_count,
            s.final_payment_date.to_string(),
            s.total_paid,
            s.interest_saved_vs_standard,
            s.years_saved,
        );
    }
}
