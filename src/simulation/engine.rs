//! Period-by-period compounding engine
//!
//! One parameterized loop serves every calculator: the period order and the
//! tiering semantics are explicit configuration, never re-derived per call
//! site. The canonical order is contribute, then grow, then fee against the
//! post-growth balance. The order is load-bearing: changing it changes
//! results materially, which is why it is named configuration rather than an
//! implementation detail.

use serde::{Deserialize, Serialize};

use super::params::SimulationParameters;
use crate::error::EngineError;

/// When the periodic contribution lands within a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContributionTiming {
    /// Contribute before growth is applied (canonical)
    #[default]
    StartOfPeriod,
    /// Contribute after growth and fee
    EndOfPeriod,
}

/// Which balance the periodic fee rate is assessed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeeBasis {
    /// Fee on the post-growth balance (canonical)
    #[default]
    PostGrowth,
    /// Fee on the balance before this period's growth
    PreGrowth,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Contribution placement within the period
    pub contribution_timing: ContributionTiming,

    /// Balance the fee rate is assessed against
    pub fee_basis: FeeBasis,

    /// Whether to record a per-period trace
    pub detailed_output: bool,
}

/// One period of simulation trace output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRow {
    /// Period number (1-indexed)
    pub period: u32,

    /// Contribution applied this period
    pub contribution: f64,

    /// Dollar growth credited this period
    pub growth: f64,

    /// Periodic fee rate assessed
    pub fee_rate: f64,

    /// Dollar fee debited
    pub fee: f64,

    /// Balance at the end of the period
    pub ending_balance: f64,

    /// Fees paid through the end of this period
    pub cumulative_fees: f64,
}

/// Outcome of one simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Balance after the final period
    pub ending_balance: f64,

    /// Total dollar fees debited across the horizon; non-negative and
    /// non-decreasing period over period
    pub total_fees_paid: f64,

    /// Per-period trace; empty unless `EngineConfig::detailed_output` is set
    pub periods: Vec<PeriodRow>,
}

/// Main simulation engine.
///
/// Holds no state between runs; every invocation is a pure function of its
/// inputs. Periods are processed strictly sequentially because each period's
/// growth and fee depend on the prior period's ending balance.
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    config: EngineConfig,
}

impl SimulationEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a simulation under a fixed nominal annual return.
    ///
    /// Fails with [`EngineError::InvalidParameters`] on malformed input;
    /// the failure is surfaced, never defaulted.
    pub fn run(&self, params: &SimulationParameters) -> Result<SimulationResult, EngineError> {
        params.validate()?;
        Ok(self.project(params, None))
    }

    /// Run a simulation driven by an explicit per-period return sequence,
    /// e.g. month-over-month returns from a historical series. The sequence
    /// must cover the whole horizon with finite entries.
    pub fn run_with_returns(
        &self,
        params: &SimulationParameters,
        periodic_returns: &[f64],
    ) -> Result<SimulationResult, EngineError> {
        params.validate()?;

        let horizon = params.horizon_periods() as usize;
        if periodic_returns.len() < horizon {
            return Err(EngineError::InvalidParameters(format!(
                "return sequence covers {} periods but the horizon needs {horizon}",
                periodic_returns.len()
            )));
        }
        if let Some(bad) = periodic_returns[..horizon].iter().find(|r| !r.is_finite()) {
            return Err(EngineError::InvalidParameters(format!(
                "return sequence contains non-finite entry {bad}"
            )));
        }

        Ok(self.project(params, Some(periodic_returns)))
    }

    /// Core loop. Assumes `params` has been validated.
    pub(crate) fn project(
        &self,
        params: &SimulationParameters,
        periodic_returns: Option<&[f64]>,
    ) -> SimulationResult {
        let horizon = params.horizon_periods();
        let fixed_factor = params.periodic_growth_factor();

        let mut balance = params.starting_balance;
        let mut total_fees = 0.0;
        let mut periods = if self.config.detailed_output {
            Vec::with_capacity(horizon as usize)
        } else {
            Vec::new()
        };

        for period in 1..=horizon {
            let factor = match periodic_returns {
                Some(returns) => 1.0 + returns[(period - 1) as usize],
                None => fixed_factor,
            };

            if self.config.contribution_timing == ContributionTiming::StartOfPeriod {
                balance += params.periodic_contribution;
            }

            let pre_growth = balance;
            let post_growth = balance * factor;

            let fee_basis = match self.config.fee_basis {
                FeeBasis::PostGrowth => post_growth,
                FeeBasis::PreGrowth => pre_growth,
            };
            let fee_rate = params.fee.periodic_rate(fee_basis, params.periods_per_year);
            // A fee is never negative, and only dollars actually in the
            // account can be collected
            let fee = (fee_basis * fee_rate).max(0.0).min(post_growth.max(0.0));

            // Clamp at zero from below after the debit
            balance = (post_growth - fee).max(0.0);
            total_fees += fee;

            if self.config.contribution_timing == ContributionTiming::EndOfPeriod {
                balance += params.periodic_contribution;
            }

            if self.config.detailed_output {
                periods.push(PeriodRow {
                    period,
                    contribution: params.periodic_contribution,
                    growth: post_growth - pre_growth,
                    fee_rate,
                    fee,
                    ending_balance: balance,
                    cumulative_fees: total_fees,
                });
            }
        }

        SimulationResult {
            ending_balance: balance,
            total_fees_paid: total_fees,
            periods,
        }
    }
}
