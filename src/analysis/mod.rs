//! Result aggregation and what-if analyses built on the engine and solvers

mod cost;
mod whatif;

pub use cost::{aggregate_cost, CostBreakdown};
pub use whatif::{
    break_even_return, fee_drag, money_weighted_return, required_alpha,
    required_extra_contribution, FeeDragReport,
};
