//! Monthly historical series: growth windows and amount conversion
//!
//! Backs the portfolio-growth and inflation calculators. A series holds
//! pre-aligned monthly observations (a total-return index, a CPI level, a
//! yield); the core only does window arithmetic on them and never fetches
//! anything itself.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::EngineError;

/// One monthly observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// First day of the observation month
    pub month: NaiveDate,

    /// Observed value (index level, CPI level, rate)
    pub value: f64,
}

/// A contiguous run of monthly observations.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySeries {
    source: String,
    points: Vec<SeriesPoint>,
}

impl MonthlySeries {
    /// Build a series, enforcing chronological order with no missing months
    /// and finite positive values (levels are divided, so zero is as bad as
    /// a gap).
    pub fn new(source: String, points: Vec<SeriesPoint>) -> Result<Self, EngineError> {
        if points.is_empty() {
            return Err(EngineError::InvalidParameters(
                "series must contain at least one observation".into(),
            ));
        }

        for (i, point) in points.iter().enumerate() {
            if !point.value.is_finite() || point.value <= 0.0 {
                return Err(EngineError::InvalidParameters(format!(
                    "observation {} has non-positive or non-finite value {}",
                    point.month, point.value
                )));
            }
            if i > 0 {
                let expected = points[i - 1]
                    .month
                    .checked_add_months(Months::new(1))
                    .ok_or_else(|| {
                        EngineError::InvalidParameters("series month out of range".into())
                    })?;
                if point.month != expected {
                    return Err(EngineError::InvalidParameters(format!(
                        "series has a gap: expected {expected}, got {}",
                        point.month
                    )));
                }
            }
        }

        Ok(Self { source, points })
    }

    /// Where the observations came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// First observed month.
    pub fn first_month(&self) -> NaiveDate {
        self.points[0].month
    }

    /// Last observed month.
    pub fn last_month(&self) -> NaiveDate {
        self.points[self.points.len() - 1].month
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty. Construction forbids this; present for
    /// the conventional pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn index_of(&self, month: NaiveDate) -> Result<usize, EngineError> {
        let month = month
            .with_day(1)
            .ok_or_else(|| EngineError::InvalidParameters("invalid month".into()))?;
        let first = self.first_month();
        if month < first || month > self.last_month() {
            return Err(EngineError::InvalidParameters(format!(
                "month {month} outside series coverage [{first}, {}]",
                self.last_month()
            )));
        }
        let offset = (month.year() - first.year()) * 12 + month.month() as i32
            - first.month() as i32;
        Ok(offset as usize)
    }

    /// Observed value for a month, if covered.
    pub fn value_at(&self, month: NaiveDate) -> Option<f64> {
        self.index_of(month).ok().map(|i| self.points[i].value)
    }

    /// Cumulative growth factor from one month's level to another's.
    pub fn growth_factor(&self, from: NaiveDate, to: NaiveDate) -> Result<f64, EngineError> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        if to_idx < from_idx {
            return Err(EngineError::InvalidParameters(
                "window end precedes window start".into(),
            ));
        }
        Ok(self.points[to_idx].value / self.points[from_idx].value)
    }

    /// Annualized return over a window: `factor^(12/months) - 1`.
    pub fn annualized_return(&self, from: NaiveDate, to: NaiveDate) -> Result<f64, EngineError> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        if to_idx <= from_idx {
            return Err(EngineError::InvalidParameters(
                "annualizing needs a window of at least one month".into(),
            ));
        }
        let factor = self.points[to_idx].value / self.points[from_idx].value;
        let months = (to_idx - from_idx) as f64;
        Ok(factor.powf(12.0 / months) - 1.0)
    }

    /// Convert an amount between two months' price levels (CPI conversion):
    /// `amount * level_to / level_from`.
    pub fn convert_amount(
        &self,
        amount: f64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<f64, EngineError> {
        if !amount.is_finite() {
            return Err(EngineError::InvalidParameters(format!(
                "amount must be finite, got {amount}"
            )));
        }
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        Ok(amount * self.points[to_idx].value / self.points[from_idx].value)
    }

    /// Month-over-month simple returns across a window, suitable for
    /// [`SimulationEngine::run_with_returns`](crate::simulation::SimulationEngine::run_with_returns).
    pub fn periodic_returns(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<f64>, EngineError> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        if to_idx <= from_idx {
            return Err(EngineError::InvalidParameters(
                "window must span at least one month".into(),
            ));
        }
        Ok((from_idx..to_idx)
            .map(|i| self.points[i + 1].value / self.points[i].value - 1.0)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    fn index_series() -> MonthlySeries {
        let points = (0..25)
            .map(|i| SeriesPoint {
                month: month(2020, 1).checked_add_months(Months::new(i)).unwrap(),
                value: 100.0 * 1.01_f64.powi(i as i32),
            })
            .collect();
        MonthlySeries::new("test index".into(), points).unwrap()
    }

    #[test]
    fn test_rejects_gap() {
        let points = vec![
            SeriesPoint { month: month(2020, 1), value: 100.0 },
            SeriesPoint { month: month(2020, 3), value: 101.0 },
        ];
        assert!(MonthlySeries::new("gappy".into(), points).is_err());
    }

    #[test]
    fn test_rejects_non_positive_level() {
        let points = vec![SeriesPoint { month: month(2020, 1), value: 0.0 }];
        assert!(MonthlySeries::new("zero".into(), points).is_err());
    }

    #[test]
    fn test_growth_factor_window() {
        let series = index_series();
        let factor = series.growth_factor(month(2020, 1), month(2021, 1)).unwrap();
        assert!((factor - 1.01_f64.powi(12)).abs() < 1e-12);
    }

    #[test]
    fn test_annualized_return_recovers_monthly_drift() {
        let series = index_series();
        let annual = series.annualized_return(month(2020, 1), month(2022, 1)).unwrap();
        assert!((annual - (1.01_f64.powi(12) - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_cpi_conversion() {
        let points = vec![
            SeriesPoint { month: month(2000, 1), value: 95.4 },
            SeriesPoint { month: month(2000, 2), value: 95.9 },
            SeriesPoint { month: month(2000, 3), value: 96.5 },
        ];
        let cpi = MonthlySeries::new("cpi".into(), points).unwrap();
        let converted = cpi.convert_amount(100.0, month(2000, 1), month(2000, 3)).unwrap();
        assert!((converted - 100.0 * 96.5 / 95.4).abs() < 1e-9);
        // Conversion runs both directions
        let back = cpi.convert_amount(converted, month(2000, 3), month(2000, 1)).unwrap();
        assert!((back - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_coverage_month_is_an_error() {
        let series = index_series();
        assert!(series.growth_factor(month(2019, 1), month(2020, 6)).is_err());
        assert!(series.value_at(month(2019, 12)).is_none());
    }

    #[test]
    fn test_periodic_returns_drive_the_engine() {
        let series = index_series();
        let returns = series.periodic_returns(month(2020, 1), month(2022, 1)).unwrap();
        assert_eq!(returns.len(), 24);
        for r in &returns {
            assert!((r - 0.01).abs() < 1e-12);
        }
    }
}
