//! Simulation input parameters and validation

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::fees::FeeSchedule;

/// Lower bound of the stability range for the nominal annual return.
pub const MIN_ANNUAL_RETURN: f64 = -0.95;

/// Upper bound of the stability range for the nominal annual return.
pub const MAX_ANNUAL_RETURN: f64 = 5.0;

/// Inputs for one compounding simulation.
///
/// The horizon is expressed in years and resolved to whole periods via
/// [`horizon_periods`](SimulationParameters::horizon_periods). All amounts
/// are floating-point currency units; rounding to display precision is a
/// caller concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Opening account balance, >= 0
    pub starting_balance: f64,

    /// Contribution added each period, >= 0
    pub periodic_contribution: f64,

    /// Horizon length in years
    pub years: f64,

    /// Compounding periods per year (12 for monthly)
    pub periods_per_year: u32,

    /// Nominal annual return as a decimal; may be negative, bounded to
    /// [`MIN_ANNUAL_RETURN`, `MAX_ANNUAL_RETURN`]
    pub annual_return: f64,

    /// Fee schedule applied by the engine each period
    pub fee: FeeSchedule,
}

impl SimulationParameters {
    /// Number of whole periods in the horizon: `round(years * periods_per_year)`.
    pub fn horizon_periods(&self) -> u32 {
        (self.years * self.periods_per_year as f64).round() as u32
    }

    /// Periodic growth factor derived from the nominal annual return:
    /// `(1 + annual_return)^(1/periods_per_year)`, exactly 1 at a 0% return.
    pub fn periodic_growth_factor(&self) -> f64 {
        if self.annual_return == 0.0 {
            1.0
        } else {
            (1.0 + self.annual_return).powf(1.0 / self.periods_per_year as f64)
        }
    }

    /// Reject malformed input. Never silently substitutes a default.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "starting balance must be finite and >= 0, got {}",
                self.starting_balance
            )));
        }
        if !self.periodic_contribution.is_finite() || self.periodic_contribution < 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "periodic contribution must be finite and >= 0, got {}",
                self.periodic_contribution
            )));
        }
        if self.periods_per_year == 0 {
            return Err(EngineError::InvalidParameters(
                "periods per year must be >= 1".into(),
            ));
        }
        if !self.years.is_finite() || self.horizon_periods() < 1 {
            return Err(EngineError::InvalidParameters(format!(
                "horizon must cover at least one period, got {} years at {} periods/year",
                self.years, self.periods_per_year
            )));
        }
        if !self.annual_return.is_finite()
            || self.annual_return < MIN_ANNUAL_RETURN
            || self.annual_return > MAX_ANNUAL_RETURN
        {
            return Err(EngineError::InvalidParameters(format!(
                "annual return must be finite within [{MIN_ANNUAL_RETURN}, {MAX_ANNUAL_RETURN}], got {}",
                self.annual_return
            )));
        }
        self.fee.validate()
    }
}
