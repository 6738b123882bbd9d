//! Long Math - deterministic what-if engine for personal-finance calculators
//!
//! This library provides:
//! - A period-by-period compounding simulator with configurable fee schedules
//! - Break-even and IRR root-finders over the simulator
//! - Cost decomposition between fees paid and lost compounding
//! - Loan amortization schedules
//! - Historical-series growth windows and inflation conversion
//! - TFSA contribution-room arithmetic

pub mod analysis;
pub mod data;
pub mod fees;
pub mod scenario;
pub mod simulation;
pub mod solver;
pub mod tfsa;

mod error;

// Re-export commonly used types
pub use analysis::{
    aggregate_cost, break_even_return, fee_drag, money_weighted_return, required_alpha,
    required_extra_contribution, CostBreakdown, FeeDragReport,
};
pub use data::{load_series, MonthlySeries};
pub use error::EngineError;
pub use fees::{FeeSchedule, Tier, TierSchedule};
pub use scenario::WhatIfRunner;
pub use simulation::{
    amortize, EngineConfig, LoanParameters, LoanSchedule, SimulationEngine, SimulationParameters,
    SimulationResult,
};
pub use solver::{solve_break_even, solve_irr, CashFlow, SolverOutcome};
pub use tfsa::{contribution_room, TfsaLimits};
