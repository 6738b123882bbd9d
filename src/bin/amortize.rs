//! Loan amortization CLI
//!
//! Prints the payment and schedule summary; optionally writes the full
//! schedule to CSV.

use anyhow::{Context, Result};
use clap::Parser;
use longmath::{amortize, LoanParameters};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Build a level-payment loan amortization schedule")]
struct Args {
    /// Amount borrowed
    #[arg(long, default_value_t = 100_000.0)]
    principal: f64,

    /// Nominal annual interest rate (decimal)
    #[arg(long, default_value_t = 0.05)]
    annual_rate: f64,

    /// Term in years
    #[arg(long, default_value_t = 25.0)]
    years: f64,

    /// Payments per year
    #[arg(long, default_value_t = 12)]
    payments_per_year: u32,

    /// Write the full schedule to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = LoanParameters {
        principal: args.principal,
        annual_rate: args.annual_rate,
        years: args.years,
        payments_per_year: args.payments_per_year,
    };

    let schedule = amortize(&params)?;

    println!("Principal:       ${:.2}", params.principal);
    println!("Payments:        {}", schedule.rows.len());
    println!("Payment:         ${:.2}", schedule.payment);
    println!("Total paid:      ${:.2}", schedule.total_paid);
    println!("Total interest:  ${:.2}", schedule.total_interest);

    if let Some(path) = &args.csv {
        let mut file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writeln!(file, "Period,Payment,Interest,Principal,Balance")?;
        for row in &schedule.rows {
            writeln!(
                file,
                "{},{:.2},{:.2},{:.2},{:.2}",
                row.period, row.payment, row.interest, row.principal, row.balance
            )?;
        }
        println!("Schedule written to: {}", path.display());
    }

    Ok(())
}
