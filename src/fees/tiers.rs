//! Tiered (bracket) fee schedules
//!
//! A tier schedule is an ordered, gap-free sequence of balance bands covering
//! [0, infinity). The same schedule supports two materially different
//! semantics, selected by the `FeeSchedule` variant that wraps it:
//! single-bracket (one rate applied to the whole balance) and
//! marginal-bracket (each band's rate applied only to the slice of balance
//! inside that band, like progressive tax brackets).

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One balance band of a tiered fee schedule.
///
/// `upper: None` marks the unbounded top tier. The bound is represented as an
/// absent value rather than `f64::INFINITY` so band-width arithmetic never
/// touches infinities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Inclusive lower balance bound
    pub lower: f64,

    /// Exclusive upper balance bound; `None` for the top tier
    pub upper: Option<f64>,

    /// Annual fee rate charged in this band (decimal, e.g. 0.012 for 1.2%)
    pub annual_rate: f64,
}

impl Tier {
    /// Whether a balance falls inside this band.
    fn contains(&self, balance: f64) -> bool {
        balance >= self.lower && self.upper.map_or(true, |upper| balance < upper)
    }
}

/// Validated, ascending sequence of tiers covering [0, infinity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierSchedule {
    tiers: Vec<Tier>,
}

impl TierSchedule {
    /// Build a schedule, enforcing the coverage invariants: the first tier
    /// starts at 0, consecutive tiers meet exactly (no gaps, no overlaps),
    /// only the last tier is unbounded, and every rate is finite and
    /// non-negative.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, EngineError> {
        if tiers.is_empty() {
            return Err(EngineError::InvalidParameters(
                "tier schedule must contain at least one tier".into(),
            ));
        }
        if tiers[0].lower != 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "first tier must start at 0, got {}",
                tiers[0].lower
            )));
        }

        for (i, tier) in tiers.iter().enumerate() {
            if !tier.lower.is_finite() {
                return Err(EngineError::InvalidParameters(format!(
                    "tier {i} has non-finite lower bound"
                )));
            }
            if !tier.annual_rate.is_finite() || tier.annual_rate < 0.0 {
                return Err(EngineError::InvalidParameters(format!(
                    "tier {i} rate must be finite and >= 0, got {}",
                    tier.annual_rate
                )));
            }

            let is_last = i == tiers.len() - 1;
            match tier.upper {
                None if !is_last => {
                    return Err(EngineError::InvalidParameters(format!(
                        "tier {i} is unbounded but not the last tier"
                    )));
                }
                Some(upper) if is_last => {
                    return Err(EngineError::InvalidParameters(format!(
                        "last tier must be unbounded, got upper bound {upper}"
                    )));
                }
                Some(upper) => {
                    if !upper.is_finite() || upper <= tier.lower {
                        return Err(EngineError::InvalidParameters(format!(
                            "tier {i} upper bound {upper} must be finite and > lower bound {}",
                            tier.lower
                        )));
                    }
                    if tiers[i + 1].lower != upper {
                        return Err(EngineError::InvalidParameters(format!(
                            "tier {} must start at {upper} where tier {i} ends, got {}",
                            i + 1,
                            tiers[i + 1].lower
                        )));
                    }
                }
                None => {}
            }
        }

        Ok(Self { tiers })
    }

    /// The tiers, ascending.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Single-bracket semantics: the one rate whose band contains the
    /// balance, applied to the whole balance. Returns 0 for a non-positive
    /// balance.
    pub fn single_bracket_rate(&self, balance: f64) -> f64 {
        if balance <= 0.0 {
            return 0.0;
        }
        self.tiers
            .iter()
            .find(|tier| tier.contains(balance))
            .map(|tier| tier.annual_rate)
            .unwrap_or(0.0)
    }

    /// Marginal-bracket semantics: each band's rate applied to the slice of
    /// balance inside that band, summed in dollars and expressed as a
    /// blended rate. Returns 0 for a non-positive balance.
    pub fn marginal_rate(&self, balance: f64) -> f64 {
        if balance <= 0.0 {
            return 0.0;
        }

        let mut fee_dollars = 0.0;
        for tier in &self.tiers {
            if balance <= tier.lower {
                break;
            }
            let band = match tier.upper {
                Some(upper) => balance.min(upper) - tier.lower,
                None => balance - tier.lower,
            };
            fee_dollars += band * tier.annual_rate;
        }

        fee_dollars / balance
    }
}

impl TryFrom<Vec<Tier>> for TierSchedule {
    type Error = EngineError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierSchedule> for Vec<Tier> {
    fn from(schedule: TierSchedule) -> Self {
        schedule.tiers
    }
}
