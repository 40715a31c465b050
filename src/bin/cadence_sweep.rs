//! Sweep weeks-per-payment for a single loan
//!
//! Usage: cargo run --bin cadence_sweep -- --principal 200000 --rate 5 --years 30 --max-weeks 8

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use loan_amortization::{LoanTerms, PaymentCadence, ScenarioRunner};
use std::time::Instant;

#[derive(Parser)]
#[command(about = "Interest saved for every cadence from 1 to N weeks")]
struct Args {
    #[arg(long, default_value_t = 200_000.0)]
    principal: f64,

    #[arg(long, default_value_t = 5.0)]
    rate: f64,

    #[arg(long, default_value_t = 30)]
    years: u32,

    /// Largest cadence to try, in weeks
    #[arg(long, default_value_t = 8)]
    max_weeks: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let terms = LoanTerms::new(args.principal, args.rate, args.years, Local::now().date_naive())?;
    let cadences = (1..=args.max_weeks)
        .map(PaymentCadence::new)
        .collect::<Result<Vec<_>, _>>()?;

    let runner = ScenarioRunner::new();
    let standard = runner.standard(&terms)?;
    println!("Monthly payment ${:.2}, total ${:.2}", standard.monthly_payment, standard.total_paid());
    println!("{:>6} {:>12} {:>8} {:>14} {:>12}", "Weeks", "Payment", "Periods", "Total Paid", "Saved");

    // Each cadence separately so an unsolvable one does not hide the rest
    for cadence in cadences {
        match runner.run(&terms, &[cadence]) {
            Ok(comparison) => {
                let s = &comparison.scenarios[0];
                println!(
                    "{:>6} {:>12.2} {:>8} {:>14.2} {:>12.2}",
                    s.weeks_per_payment,
                    s.payment_per_period,
                    s.actual_period_count,
                    s.total_paid,
                    s.interest_saved_vs_standard,
                );
            }
            Err(e) => println!("{:>6} {}", cadence.weeks_per_payment(), e),
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
