//! What-if runner for comparisons and batch evaluation
//!
//! Thin orchestration over the engine: one place to hold the engine
//! configuration and fan a parameter grid out across cores. Every run is a
//! pure function of its inputs, so the batch path needs no locking.

use rayon::prelude::*;

use crate::analysis::{fee_drag, FeeDragReport};
use crate::error::EngineError;
use crate::simulation::{EngineConfig, SimulationEngine, SimulationParameters, SimulationResult};

/// Pre-configured runner for what-if evaluations.
#[derive(Debug, Clone, Default)]
pub struct WhatIfRunner {
    engine: SimulationEngine,
}

impl WhatIfRunner {
    /// Runner with the canonical period order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner with an explicit engine configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: SimulationEngine::new(config),
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Run a single simulation.
    pub fn run(&self, params: &SimulationParameters) -> Result<SimulationResult, EngineError> {
        self.engine.run(params)
    }

    /// Run many parameter sets in parallel, preserving input order.
    pub fn run_batch(
        &self,
        params: &[SimulationParameters],
    ) -> Vec<Result<SimulationResult, EngineError>> {
        params.par_iter().map(|p| self.engine.run(p)).collect()
    }

    /// Full fee-drag analysis for one parameter set.
    pub fn fee_drag(&self, params: &SimulationParameters) -> Result<FeeDragReport, EngineError> {
        fee_drag(&self.engine, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fees::FeeSchedule;

    fn params(annual_fee: f64) -> SimulationParameters {
        SimulationParameters {
            starting_balance: 20_000.0,
            periodic_contribution: 300.0,
            years: 20.0,
            periods_per_year: 12,
            annual_return: 0.065,
            fee: FeeSchedule::FlatPercent { annual_rate: annual_fee },
        }
    }

    #[test]
    fn test_batch_preserves_order_and_monotonicity() {
        let runner = WhatIfRunner::new();
        let grid: Vec<_> = [0.0, 0.005, 0.01, 0.02].iter().map(|&f| params(f)).collect();

        let results = runner.run_batch(&grid);
        assert_eq!(results.len(), 4);

        let endings: Vec<f64> = results
            .into_iter()
            .map(|r| r.unwrap().ending_balance)
            .collect();
        // Heavier fee schedules end lower
        for pair in endings.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let runner = WhatIfRunner::new();
        let grid: Vec<_> = [0.0, 0.01].iter().map(|&f| params(f)).collect();

        let batch = runner.run_batch(&grid);
        for (p, result) in grid.iter().zip(batch) {
            let sequential = runner.run(p).unwrap();
            assert_eq!(result.unwrap().ending_balance, sequential.ending_balance);
        }
    }

    #[test]
    fn test_runner_surfaces_invalid_parameters() {
        let runner = WhatIfRunner::new();
        let mut bad = params(0.01);
        bad.starting_balance = f64::NAN;
        assert!(runner.run(&bad).is_err());
    }
}
