//! Fee-drag calculator CLI
//!
//! Runs the baseline/treatment comparison with break-even answers.
//! Supports JSON output for downstream tooling via --json.

use anyhow::{bail, Context, Result};
use clap::Parser;
use longmath::{fee_drag, FeeSchedule, SimulationEngine, SimulationParameters, SolverOutcome};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Compare a fee-burdened account against its no-fee baseline")]
struct Args {
    /// Opening account balance
    #[arg(long, default_value_t = 25_000.0)]
    starting_balance: f64,

    /// Contribution per period
    #[arg(long, default_value_t = 500.0)]
    contribution: f64,

    /// Horizon in years
    #[arg(long, default_value_t = 25.0)]
    years: f64,

    /// Compounding periods per year
    #[arg(long, default_value_t = 12)]
    periods_per_year: u32,

    /// Nominal annual return (decimal)
    #[arg(long, default_value_t = 0.06)]
    annual_return: f64,

    /// Annual percentage fee (decimal, e.g. 0.02 for a 2% MER)
    #[arg(long, conflicts_with_all = ["fee_dollar", "tier_csv"])]
    fee_percent: Option<f64>,

    /// Flat annual dollar fee
    #[arg(long, conflicts_with = "tier_csv")]
    fee_dollar: Option<f64>,

    /// CSV file of fee brackets (lower,upper,annual_rate)
    #[arg(long)]
    tier_csv: Option<PathBuf>,

    /// Treat the bracket schedule as marginal instead of single-bracket
    #[arg(long, requires = "tier_csv")]
    marginal: bool,

    /// Emit the full report as JSON
    #[arg(long)]
    json: bool,
}

fn fee_schedule(args: &Args) -> Result<FeeSchedule> {
    if let Some(rate) = args.fee_percent {
        return Ok(FeeSchedule::FlatPercent { annual_rate: rate });
    }
    if let Some(amount) = args.fee_dollar {
        return Ok(FeeSchedule::FlatDollar { annual_amount: amount });
    }
    if let Some(path) = &args.tier_csv {
        let tiers = longmath::fees::load_tier_schedule(path)
            .map_err(|err| anyhow::anyhow!("{err}"))
            .with_context(|| format!("loading tier schedule from {}", path.display()))?;
        return Ok(if args.marginal {
            FeeSchedule::TieredMarginal(tiers)
        } else {
            FeeSchedule::TieredSingle(tiers)
        });
    }
    bail!("select a fee with --fee-percent, --fee-dollar, or --tier-csv");
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = SimulationParameters {
        starting_balance: args.starting_balance,
        periodic_contribution: args.contribution,
        years: args.years,
        periods_per_year: args.periods_per_year,
        annual_return: args.annual_return,
        fee: fee_schedule(&args)?,
    };

    let engine = SimulationEngine::default();
    let report = fee_drag(&engine, &params)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Ending balance (no fee):   ${:.2}", report.baseline.ending_balance);
    println!("Ending balance (with fee): ${:.2}", report.treatment.ending_balance);
    println!("Fees paid:                 ${:.2}", report.cost.fees_paid);
    println!("Lost compounding:          ${:.2}", report.cost.lost_compounding);
    println!("Total cost:                ${:.2}", report.cost.total_cost);
    print_outcome("Break-even return", scale_pct(report.break_even_return), "%");
    print_outcome(
        "Required extra contribution",
        report.required_extra_contribution,
        "/period",
    );
    print_outcome("Required alpha", scale_pct(report.required_alpha), "%");
    match report.money_weighted_return {
        Some(rate) => println!("Money-weighted return:     {:.4}%", rate * 100.0),
        None => println!("Money-weighted return:     not solvable"),
    }

    Ok(())
}

fn scale_pct(outcome: SolverOutcome) -> SolverOutcome {
    SolverOutcome {
        value: outcome.value * 100.0,
        capped: outcome.capped,
    }
}

fn print_outcome(label: &str, outcome: SolverOutcome, unit: &str) {
    if outcome.capped {
        println!("{label}: beyond domain bound {:.4}{unit}", outcome.value);
    } else {
        println!("{label}: {:.4}{unit}", outcome.value);
    }
}
