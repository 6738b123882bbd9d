//! Cost decomposition between a baseline and a fee-burdened trajectory

use serde::{Deserialize, Serialize};

use crate::simulation::SimulationResult;

/// Where the gap between a no-fee baseline and a with-fee treatment went.
///
/// `total_cost` splits into the fees actually debited and the compounding
/// those dollars would have earned had they stayed invested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Dollars debited as fees over the horizon
    pub fees_paid: f64,

    /// Foregone growth on the dollars that left as fees
    pub lost_compounding: f64,

    /// Ending-balance gap: `fees_paid + lost_compounding`
    pub total_cost: f64,
}

/// Decompose the cost of fees given a baseline (no-fee) and a treatment
/// (with-fee) simulation of the same parameters.
pub fn aggregate_cost(baseline: &SimulationResult, treatment: &SimulationResult) -> CostBreakdown {
    let total_cost = (baseline.ending_balance - treatment.ending_balance).max(0.0);
    let fees_paid = treatment.total_fees_paid;
    let lost_compounding = (total_cost - fees_paid).max(0.0);

    CostBreakdown {
        fees_paid,
        lost_compounding,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fees::FeeSchedule;
    use crate::simulation::{SimulationEngine, SimulationParameters};
    use approx::assert_relative_eq;

    fn run_pair(annual_rate: f64) -> (SimulationResult, SimulationResult) {
        let engine = SimulationEngine::default();
        let mut params = SimulationParameters {
            starting_balance: 50_000.0,
            periodic_contribution: 250.0,
            years: 20.0,
            periods_per_year: 12,
            annual_return: 0.07,
            fee: FeeSchedule::None,
        };
        let baseline = engine.run(&params).unwrap();
        params.fee = FeeSchedule::FlatPercent { annual_rate };
        let treatment = engine.run(&params).unwrap();
        (baseline, treatment)
    }

    #[test]
    fn test_decomposition_closes() {
        for annual_rate in [0.0025, 0.01, 0.022] {
            let (baseline, treatment) = run_pair(annual_rate);
            let cost = aggregate_cost(&baseline, &treatment);

            assert!(cost.fees_paid >= 0.0);
            assert!(cost.lost_compounding >= 0.0);
            assert_relative_eq!(
                cost.total_cost,
                cost.fees_paid + cost.lost_compounding,
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn test_zero_fee_costs_nothing() {
        let (baseline, _) = run_pair(0.01);
        let cost = aggregate_cost(&baseline, &baseline);
        assert_eq!(cost.total_cost, 0.0);
        assert_eq!(cost.fees_paid, 0.0);
        assert_eq!(cost.lost_compounding, 0.0);
    }

    #[test]
    fn test_lost_compounding_grows_with_horizon() {
        // Over a long horizon the foregone growth dominates the fees
        let (baseline, treatment) = run_pair(0.02);
        let cost = aggregate_cost(&baseline, &treatment);
        assert!(cost.lost_compounding > 0.0);
        assert!(cost.total_cost > cost.fees_paid);
    }
}
