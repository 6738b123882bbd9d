//! Break-even and money-weighted-return wrappers over the engine
//!
//! Each wrapper turns the simulation into a scalar function of one knob and
//! hands it to the shared solvers. Search bounds that cannot reach the
//! target are expanded geometrically a bounded number of times, then
//! reported as capped.

use log::debug;
use serde::Serialize;

use super::cost::{aggregate_cost, CostBreakdown};
use crate::error::EngineError;
use crate::fees::FeeSchedule;
use crate::simulation::{
    ContributionTiming, SimulationEngine, SimulationParameters, SimulationResult,
    MAX_ANNUAL_RETURN, MIN_ANNUAL_RETURN,
};
use crate::solver::{
    solve_break_even, solve_irr, CashFlow, SolverOutcome, DEFAULT_BISECTION_ITERATIONS,
};

/// Cap on geometric expansions of a search bound.
const MAX_BOUND_EXPANSIONS: u32 = 8;

/// Everything a fee-drag calculator renders, in one plain record.
#[derive(Debug, Clone, Serialize)]
pub struct FeeDragReport {
    /// No-fee trajectory of the same parameters
    pub baseline: SimulationResult,

    /// Trajectory under the configured fee schedule
    pub treatment: SimulationResult,

    /// Cost decomposition between the two
    pub cost: CostBreakdown,

    /// Annual return at which the with-fee trajectory matches the baseline
    pub break_even_return: SolverOutcome,

    /// Per-period contribution top-up that closes the fee gap
    pub required_extra_contribution: SolverOutcome,

    /// Extra annual return on top of the nominal that closes the fee gap
    pub required_alpha: SolverOutcome,

    /// Money-weighted annual return of the with-fee trajectory
    pub money_weighted_return: Option<f64>,
}

fn baseline_params(params: &SimulationParameters) -> SimulationParameters {
    SimulationParameters {
        fee: FeeSchedule::None,
        ..params.clone()
    }
}

/// Annual return at which the with-fee trajectory reaches the no-fee
/// baseline's ending balance. Capped at the stability range bounds.
pub fn break_even_return(
    engine: &SimulationEngine,
    params: &SimulationParameters,
) -> Result<SolverOutcome, EngineError> {
    params.validate()?;
    let target = engine.project(&baseline_params(params), None).ending_balance;

    let f = |rate: f64| {
        let candidate = SimulationParameters { annual_return: rate, ..params.clone() };
        engine.project(&candidate, None).ending_balance
    };

    Ok(solve_break_even(
        f,
        target,
        MIN_ANNUAL_RETURN,
        MAX_ANNUAL_RETURN,
        DEFAULT_BISECTION_ITERATIONS,
    ))
}

/// Per-period contribution top-up at which the with-fee trajectory reaches
/// the no-fee baseline's ending balance. The upper search bound starts near
/// the current contribution and doubles a bounded number of times before the
/// outcome is reported capped.
pub fn required_extra_contribution(
    engine: &SimulationEngine,
    params: &SimulationParameters,
) -> Result<SolverOutcome, EngineError> {
    params.validate()?;
    let target = engine.project(&baseline_params(params), None).ending_balance;

    let f = |extra: f64| {
        let candidate = SimulationParameters {
            periodic_contribution: params.periodic_contribution + extra,
            ..params.clone()
        };
        engine.project(&candidate, None).ending_balance
    };

    let mut hi = params.periodic_contribution.max(1.0);
    let mut expansions = 0;
    while f(hi) < target && expansions < MAX_BOUND_EXPANSIONS {
        hi *= 2.0;
        expansions += 1;
        debug!("required_extra_contribution: expanded search bound to {hi}");
    }

    Ok(solve_break_even(f, target, 0.0, hi, DEFAULT_BISECTION_ITERATIONS))
}

/// Extra annual return ("alpha") on top of the nominal at which the with-fee
/// trajectory reaches the no-fee baseline's ending balance. The domain is
/// hard-capped by the stability range, so a capped outcome means no
/// admissible alpha closes the gap.
pub fn required_alpha(
    engine: &SimulationEngine,
    params: &SimulationParameters,
) -> Result<SolverOutcome, EngineError> {
    params.validate()?;
    let target = engine.project(&baseline_params(params), None).ending_balance;

    let f = |alpha: f64| {
        let candidate = SimulationParameters {
            annual_return: params.annual_return + alpha,
            ..params.clone()
        };
        engine.project(&candidate, None).ending_balance
    };

    let hi = MAX_ANNUAL_RETURN - params.annual_return;
    Ok(solve_break_even(f, target, 0.0, hi, DEFAULT_BISECTION_ITERATIONS))
}

/// Money-weighted annual return of a simulation: the IRR of its signed cash
/// flows (starting balance and contributions out, ending balance in).
/// `None` means no rate makes the flows break even.
pub fn money_weighted_return(
    engine: &SimulationEngine,
    params: &SimulationParameters,
) -> Result<Option<f64>, EngineError> {
    params.validate()?;
    let result = engine.project(params, None);

    let horizon = params.horizon_periods();
    let mut cashflows = Vec::with_capacity(horizon as usize + 2);
    cashflows.push(CashFlow { period_offset: 0, amount: -params.starting_balance });

    if params.periodic_contribution > 0.0 {
        for period in 1..=horizon {
            let offset = match engine.config().contribution_timing {
                ContributionTiming::StartOfPeriod => period - 1,
                ContributionTiming::EndOfPeriod => period,
            };
            cashflows.push(CashFlow { period_offset: offset, amount: -params.periodic_contribution });
        }
    }

    cashflows.push(CashFlow { period_offset: horizon, amount: result.ending_balance });

    Ok(solve_irr(&cashflows, params.periods_per_year))
}

/// Run the full fee-drag analysis: baseline, treatment, cost decomposition,
/// the three break-even answers, and the money-weighted return.
pub fn fee_drag(
    engine: &SimulationEngine,
    params: &SimulationParameters,
) -> Result<FeeDragReport, EngineError> {
    params.validate()?;

    let baseline = engine.project(&baseline_params(params), None);
    let treatment = engine.project(params, None);
    let cost = aggregate_cost(&baseline, &treatment);

    Ok(FeeDragReport {
        break_even_return: break_even_return(engine, params)?,
        required_extra_contribution: required_extra_contribution(engine, params)?,
        required_alpha: required_alpha(engine, params)?,
        money_weighted_return: money_weighted_return(engine, params)?,
        baseline,
        treatment,
        cost,
    })
}
