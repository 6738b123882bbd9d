//! TFSA contribution room arithmetic
//!
//! Room accrues from the annual dollar limit each year the holder is
//! eligible, shrinks with contributions, and withdrawals come back as room
//! the following January. The historical limit table ships built in; callers
//! with different assumptions supply their own.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::EngineError;

/// First year the program existed; room never accrues earlier.
pub const PROGRAM_START_YEAR: i32 = 2009;

/// Annual contribution limits by calendar year.
#[derive(Debug, Clone, Serialize)]
pub struct TfsaLimits {
    by_year: BTreeMap<i32, f64>,
}

impl TfsaLimits {
    /// The published limits, 2009 through 2026.
    pub fn historical() -> Self {
        let mut by_year = BTreeMap::new();
        for year in 2009..=2012 {
            by_year.insert(year, 5_000.0);
        }
        by_year.insert(2013, 5_500.0);
        by_year.insert(2014, 5_500.0);
        by_year.insert(2015, 10_000.0);
        for year in 2016..=2018 {
            by_year.insert(year, 5_500.0);
        }
        for year in 2019..=2022 {
            by_year.insert(year, 6_000.0);
        }
        by_year.insert(2023, 6_500.0);
        for year in 2024..=2026 {
            by_year.insert(year, 7_000.0);
        }
        Self { by_year }
    }

    /// Build a table from explicit year/limit pairs.
    pub fn from_table(pairs: impl IntoIterator<Item = (i32, f64)>) -> Result<Self, EngineError> {
        let mut by_year = BTreeMap::new();
        for (year, limit) in pairs {
            if !limit.is_finite() || limit < 0.0 {
                return Err(EngineError::InvalidParameters(format!(
                    "limit for {year} must be finite and >= 0, got {limit}"
                )));
            }
            by_year.insert(year, limit);
        }
        if by_year.is_empty() {
            return Err(EngineError::InvalidParameters(
                "limit table must cover at least one year".into(),
            ));
        }
        Ok(Self { by_year })
    }

    /// The limit for a year, if the table covers it.
    pub fn limit_for(&self, year: i32) -> Option<f64> {
        self.by_year.get(&year).copied()
    }

    /// Last year the table covers.
    pub fn last_year(&self) -> i32 {
        *self.by_year.keys().next_back().expect("table is never empty")
    }
}

/// Inputs for a contribution-room calculation.
#[derive(Debug, Clone, Serialize)]
pub struct RoomInputs {
    /// First year the holder was eligible (turned 18 and resident)
    pub first_eligible_year: i32,

    /// Year the room is being computed for
    pub as_of_year: i32,

    /// Contributions by calendar year
    pub contributions: Vec<(i32, f64)>,

    /// Withdrawals by calendar year
    pub withdrawals: Vec<(i32, f64)>,
}

/// Compute remaining contribution room as of January of `as_of_year`.
///
/// Room is the sum of annual limits from the later of the first eligible
/// year and the program start, minus all contributions, plus withdrawals
/// made in years strictly before the as-of year (withdrawn room returns the
/// following January). Negative room — an over-contribution — is reported
/// as-is.
pub fn contribution_room(inputs: &RoomInputs, limits: &TfsaLimits) -> Result<f64, EngineError> {
    if inputs.as_of_year < inputs.first_eligible_year {
        return Err(EngineError::InvalidParameters(format!(
            "as-of year {} precedes first eligible year {}",
            inputs.as_of_year, inputs.first_eligible_year
        )));
    }
    if inputs.as_of_year > limits.last_year() {
        return Err(EngineError::InvalidParameters(format!(
            "as-of year {} beyond the limit table's coverage ({})",
            inputs.as_of_year,
            limits.last_year()
        )));
    }

    let accrual_start = inputs.first_eligible_year.max(PROGRAM_START_YEAR);
    let mut room = 0.0;
    for year in accrual_start..=inputs.as_of_year {
        room += limits.limit_for(year).ok_or_else(|| {
            EngineError::InvalidParameters(format!("limit table does not cover {year}"))
        })?;
    }

    for &(year, amount) in &inputs.contributions {
        if !amount.is_finite() || amount < 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "contribution in {year} must be finite and >= 0, got {amount}"
            )));
        }
        if year < accrual_start || year > inputs.as_of_year {
            return Err(EngineError::InvalidParameters(format!(
                "contribution year {year} outside [{accrual_start}, {}]",
                inputs.as_of_year
            )));
        }
        room -= amount;
    }

    for &(year, amount) in &inputs.withdrawals {
        if !amount.is_finite() || amount < 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "withdrawal in {year} must be finite and >= 0, got {amount}"
            )));
        }
        if year < accrual_start || year > inputs.as_of_year {
            return Err(EngineError::InvalidParameters(format!(
                "withdrawal year {year} outside [{accrual_start}, {}]",
                inputs.as_of_year
            )));
        }
        // Withdrawn room comes back the following January
        if year < inputs.as_of_year {
            room += amount;
        }
    }

    Ok(room)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_accrual_from_program_start() {
        let inputs = RoomInputs {
            first_eligible_year: 2009,
            as_of_year: 2024,
            contributions: vec![],
            withdrawals: vec![],
        };
        let room = contribution_room(&inputs, &TfsaLimits::historical()).unwrap();
        // Published cumulative room for someone eligible since 2009
        assert_eq!(room, 95_000.0);
    }

    #[test]
    fn test_contributions_reduce_room() {
        let inputs = RoomInputs {
            first_eligible_year: 2020,
            as_of_year: 2024,
            contributions: vec![(2020, 6_000.0), (2023, 4_000.0)],
            withdrawals: vec![],
        };
        let room = contribution_room(&inputs, &TfsaLimits::historical()).unwrap();
        // 6000*3 + 6500 + 7000 accrued, 10000 contributed
        assert_eq!(room, 31_500.0 - 10_000.0);
    }

    #[test]
    fn test_withdrawal_restores_room_next_year() {
        let base = RoomInputs {
            first_eligible_year: 2020,
            as_of_year: 2024,
            contributions: vec![(2020, 6_000.0)],
            withdrawals: vec![(2023, 2_000.0)],
        };
        let room = contribution_room(&base, &TfsaLimits::historical()).unwrap();
        assert_eq!(room, 31_500.0 - 6_000.0 + 2_000.0);

        // A same-year withdrawal does not come back until January
        let same_year = RoomInputs {
            withdrawals: vec![(2024, 2_000.0)],
            ..base
        };
        let room = contribution_room(&same_year, &TfsaLimits::historical()).unwrap();
        assert_eq!(room, 31_500.0 - 6_000.0);
    }

    #[test]
    fn test_over_contribution_reports_negative_room() {
        let inputs = RoomInputs {
            first_eligible_year: 2024,
            as_of_year: 2024,
            contributions: vec![(2024, 10_000.0)],
            withdrawals: vec![],
        };
        let room = contribution_room(&inputs, &TfsaLimits::historical()).unwrap();
        assert_eq!(room, 7_000.0 - 10_000.0);
    }

    #[test]
    fn test_rejects_uncovered_years() {
        let inputs = RoomInputs {
            first_eligible_year: 2020,
            as_of_year: 2050,
            contributions: vec![],
            withdrawals: vec![],
        };
        assert!(contribution_room(&inputs, &TfsaLimits::historical()).is_err());
    }

    #[test]
    fn test_custom_table() {
        let limits = TfsaLimits::from_table([(2030, 8_000.0), (2031, 8_000.0)]).unwrap();
        let inputs = RoomInputs {
            first_eligible_year: 2030,
            as_of_year: 2031,
            contributions: vec![(2030, 1_000.0)],
            withdrawals: vec![],
        };
        assert_eq!(contribution_room(&inputs, &limits).unwrap(), 15_000.0);
    }
}
