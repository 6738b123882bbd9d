//! Fee schedule variants and the balance-to-rate contract

use serde::{Deserialize, Serialize};

use super::tiers::TierSchedule;
use crate::error::EngineError;

/// How an account is charged, expressed as annual quantities.
///
/// Every variant reduces to an effective periodic rate against the current
/// balance via [`FeeSchedule::periodic_rate`]. The two tiered variants carry
/// materially different semantics and are deliberately separate: a
/// single-bracket schedule charges the whole balance at one band's rate,
/// while a marginal-bracket schedule charges each band only for the slice of
/// balance inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeeSchedule {
    /// No fee; the baseline in cost comparisons
    None,

    /// Flat annual percentage of balance (e.g. a fund MER)
    FlatPercent {
        /// Annual rate as a decimal (0.02 for 2%)
        annual_rate: f64,
    },

    /// Flat annual dollar amount, spread evenly across the year's periods
    FlatDollar {
        /// Annual fee in dollars
        annual_amount: f64,
    },

    /// Hourly advice amortized over the year
    HourlyRate {
        /// Dollars per hour
        hourly_rate: f64,
        /// Billed hours per year
        hours_per_year: f64,
    },

    /// One band's rate applied to the whole balance
    TieredSingle(TierSchedule),

    /// Each band's rate applied to the slice of balance inside it
    TieredMarginal(TierSchedule),
}

impl FeeSchedule {
    /// Annual effective fee rate against a balance.
    ///
    /// Dollar-denominated variants convert to a rate by dividing by the
    /// balance, and charge nothing against a non-positive balance (a fee is
    /// never negative, and there is no division by zero).
    pub fn annual_rate(&self, balance: f64) -> f64 {
        match self {
            FeeSchedule::None => 0.0,
            FeeSchedule::FlatPercent { annual_rate } => *annual_rate,
            FeeSchedule::FlatDollar { annual_amount } => {
                if balance > 0.0 {
                    annual_amount / balance
                } else {
                    0.0
                }
            }
            FeeSchedule::HourlyRate { hourly_rate, hours_per_year } => {
                if balance > 0.0 {
                    (hourly_rate * hours_per_year) / balance
                } else {
                    0.0
                }
            }
            FeeSchedule::TieredSingle(tiers) => tiers.single_bracket_rate(balance),
            FeeSchedule::TieredMarginal(tiers) => tiers.marginal_rate(balance),
        }
    }

    /// Periodic fee rate: the annual effective rate split across the year's
    /// periods. This is what the simulation engine applies each period.
    pub fn periodic_rate(&self, balance: f64, periods_per_year: u32) -> f64 {
        if periods_per_year == 0 {
            return 0.0;
        }
        self.annual_rate(balance) / periods_per_year as f64
    }

    /// Validate the schedule's own numeric inputs. Tier schedules are
    /// validated at construction; the scalar variants are checked here.
    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            FeeSchedule::None | FeeSchedule::TieredSingle(_) | FeeSchedule::TieredMarginal(_) => {
                Ok(())
            }
            FeeSchedule::FlatPercent { annual_rate } => {
                if !annual_rate.is_finite() || *annual_rate < 0.0 {
                    return Err(EngineError::InvalidParameters(format!(
                        "flat percent rate must be finite and >= 0, got {annual_rate}"
                    )));
                }
                Ok(())
            }
            FeeSchedule::FlatDollar { annual_amount } => {
                if !annual_amount.is_finite() || *annual_amount < 0.0 {
                    return Err(EngineError::InvalidParameters(format!(
                        "flat dollar amount must be finite and >= 0, got {annual_amount}"
                    )));
                }
                Ok(())
            }
            FeeSchedule::HourlyRate { hourly_rate, hours_per_year } => {
                if !hourly_rate.is_finite() || *hourly_rate < 0.0 {
                    return Err(EngineError::InvalidParameters(format!(
                        "hourly rate must be finite and >= 0, got {hourly_rate}"
                    )));
                }
                if !hours_per_year.is_finite() || *hours_per_year < 0.0 {
                    return Err(EngineError::InvalidParameters(format!(
                        "hours per year must be finite and >= 0, got {hours_per_year}"
                    )));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fees::Tier;

    #[test]
    fn test_flat_percent_is_balance_independent() {
        let fee = FeeSchedule::FlatPercent { annual_rate: 0.02 };
        assert_eq!(fee.annual_rate(1_000.0), 0.02);
        assert_eq!(fee.annual_rate(1_000_000.0), 0.02);
        assert_eq!(fee.periodic_rate(1_000.0, 12), 0.02 / 12.0);
    }

    #[test]
    fn test_flat_dollar_spreads_across_periods() {
        let fee = FeeSchedule::FlatDollar { annual_amount: 1_200.0 };
        // Periodic rate times balance recovers the periodic dollar amount
        let rate = fee.periodic_rate(50_000.0, 12);
        assert!((rate * 50_000.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_dollar_fees_skip_empty_accounts() {
        let flat = FeeSchedule::FlatDollar { annual_amount: 1_200.0 };
        let hourly = FeeSchedule::HourlyRate { hourly_rate: 250.0, hours_per_year: 6.0 };
        assert_eq!(flat.annual_rate(0.0), 0.0);
        assert_eq!(flat.annual_rate(-5.0), 0.0);
        assert_eq!(hourly.annual_rate(0.0), 0.0);
    }

    #[test]
    fn test_hourly_rate_amortizes() {
        let fee = FeeSchedule::HourlyRate { hourly_rate: 250.0, hours_per_year: 6.0 };
        assert!((fee.annual_rate(100_000.0) - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let fee = FeeSchedule::FlatPercent { annual_rate: f64::NAN };
        assert!(fee.validate().is_err());
        let fee = FeeSchedule::FlatDollar { annual_amount: f64::INFINITY };
        assert!(fee.validate().is_err());
        let fee = FeeSchedule::HourlyRate { hourly_rate: -1.0, hours_per_year: 6.0 };
        assert!(fee.validate().is_err());
    }

    #[test]
    fn test_tiered_variants_diverge_across_bands() {
        let tiers = TierSchedule::new(vec![
            Tier { lower: 0.0, upper: Some(100_000.0), annual_rate: 0.015 },
            Tier { lower: 100_000.0, upper: None, annual_rate: 0.005 },
        ])
        .unwrap();
        let single = FeeSchedule::TieredSingle(tiers.clone());
        let marginal = FeeSchedule::TieredMarginal(tiers);

        // Above the boundary the whole-balance rate drops to the top band,
        // while the blended rate still charges the first slice at 1.5%
        assert_eq!(single.annual_rate(200_000.0), 0.005);
        let blended = (100_000.0 * 0.015 + 100_000.0 * 0.005) / 200_000.0;
        assert!((marginal.annual_rate(200_000.0) - blended).abs() < 1e-12);
        assert!(marginal.annual_rate(200_000.0) > single.annual_rate(200_000.0));
    }
}
