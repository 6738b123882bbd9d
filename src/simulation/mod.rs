//! Compounding simulation: parameters, the period engine, and the loan variant

mod engine;
mod loan;
mod params;

pub use engine::{
    ContributionTiming, EngineConfig, FeeBasis, PeriodRow, SimulationEngine, SimulationResult,
};
pub use loan::{amortize, level_payment, LoanParameters, LoanSchedule, PaymentRow};
pub use params::{SimulationParameters, MAX_ANNUAL_RETURN, MIN_ANNUAL_RETURN};
