//! Long Math CLI
//!
//! Command-line demo: runs a fee-drag comparison and prints the trajectory,
//! the cost decomposition, and the break-even answers.

use longmath::{
    fee_drag, EngineConfig, FeeSchedule, SimulationEngine, SimulationParameters,
};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    println!("Long Math v0.1.0");
    println!("================\n");

    // A typical fee-drag question: 2% MER on a monthly-contribution account
    let params = SimulationParameters {
        starting_balance: 25_000.0,
        periodic_contribution: 500.0,
        years: 25.0,
        periods_per_year: 12,
        annual_return: 0.06,
        fee: FeeSchedule::FlatPercent { annual_rate: 0.02 },
    };

    println!("Inputs:");
    println!("  Starting balance: ${:.2}", params.starting_balance);
    println!("  Contribution:     ${:.2}/period", params.periodic_contribution);
    println!("  Horizon:          {} periods", params.horizon_periods());
    println!("  Nominal return:   {:.2}%", params.annual_return * 100.0);
    println!();

    let engine = SimulationEngine::new(EngineConfig {
        detailed_output: true,
        ..EngineConfig::default()
    });

    let report = match fee_drag(&engine, &params) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    // Print first 24 periods to console
    println!("Trajectory under fees ({} periods):", report.treatment.periods.len());
    println!("{:>6} {:>14} {:>12} {:>10} {:>10} {:>14}",
        "Period", "Contribution", "Growth", "FeeRate", "Fee", "EOP Balance");
    println!("{}", "-".repeat(72));
    for row in report.treatment.periods.iter().take(24) {
        println!("{:>6} {:>14.2} {:>12.2} {:>10.6} {:>10.2} {:>14.2}",
            row.period,
            row.contribution,
            row.growth,
            row.fee_rate,
            row.fee,
            row.ending_balance,
        );
    }
    if report.treatment.periods.len() > 24 {
        println!("... ({} more periods)", report.treatment.periods.len() - 24);
    }

    // Write the full trace to CSV for spreadsheet comparison
    let csv_path = "fee_drag_output.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");
    writeln!(file, "Period,Contribution,Growth,FeeRate,Fee,EOP_Balance,CumulativeFees").unwrap();
    for row in &report.treatment.periods {
        writeln!(file, "{},{:.8},{:.8},{:.10},{:.8},{:.8},{:.8}",
            row.period,
            row.contribution,
            row.growth,
            row.fee_rate,
            row.fee,
            row.ending_balance,
            row.cumulative_fees,
        ).unwrap();
    }
    println!("\nFull trace written to: {}", csv_path);

    println!("\nSummary:");
    println!("  Ending balance (no fee):   ${:.2}", report.baseline.ending_balance);
    println!("  Ending balance (with fee): ${:.2}", report.treatment.ending_balance);
    println!("  Fees paid:                 ${:.2}", report.cost.fees_paid);
    println!("  Lost compounding:          ${:.2}", report.cost.lost_compounding);
    println!("  Total cost:                ${:.2}", report.cost.total_cost);

    println!("\nBreak-even answers:");
    print_outcome("Return needed to match baseline", report.break_even_return.value * 100.0, "%", report.break_even_return.capped);
    print_outcome("Extra contribution needed", report.required_extra_contribution.value, "/period", report.required_extra_contribution.capped);
    print_outcome("Extra return (alpha) needed", report.required_alpha.value * 100.0, "%", report.required_alpha.capped);
    match report.money_weighted_return {
        Some(rate) => println!("  Money-weighted return:     {:.4}%", rate * 100.0),
        None => println!("  Money-weighted return:     not solvable"),
    }
}

fn print_outcome(label: &str, value: f64, unit: &str, capped: bool) {
    if capped {
        println!("  {label}: >= {value:.4}{unit} (capped at domain bound)");
    } else {
        println!("  {label}: {value:.4}{unit}");
    }
}
