//! Internal rate of return over a discrete cash-flow list
//!
//! Newton-Raphson first, bisection on an expanding bracket when Newton
//! misbehaves, closed-form CAGR as a last resort. `None` means no rate makes
//! the sequence break even; callers must render that distinctly from a
//! computed 0%.

use log::debug;
use serde::{Deserialize, Serialize};

/// Convergence tolerance for both NPV magnitude and rate step.
const TOLERANCE: f64 = 1e-9;

/// Newton iteration cap.
const MAX_NEWTON_ITERATIONS: u32 = 100;

/// Bisection iteration cap.
const MAX_BISECTION_ITERATIONS: u32 = 200;

/// Cap on geometric expansions of the bisection bracket's upper bound.
const MAX_BRACKET_EXPANSIONS: u32 = 8;

/// Initial bisection bracket for the annual rate.
const BRACKET_LO: f64 = -0.90;
const BRACKET_HI: f64 = 1.00;

/// One dated cash flow. Outflows (contributions, principal) are negative,
/// inflows (ending value) positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Offset from the first flow, in periods
    pub period_offset: u32,

    /// Signed amount
    pub amount: f64,
}

impl CashFlow {
    fn years(&self, periods_per_year: u32) -> f64 {
        self.period_offset as f64 / periods_per_year as f64
    }
}

/// Solve for the annual rate at which the cash flows' net present value is
/// zero.
///
/// # Arguments
/// * `cashflows` - At least two dated flows with at least one sign change
/// * `periods_per_year` - How `period_offset` converts to years (12 for monthly)
///
/// # Returns
/// * `Option<f64>` - Annual rate as a decimal (0.05 for 5%), or `None` when
///   no rate within the search strategy's reach makes the sequence break even
pub fn solve_irr(cashflows: &[CashFlow], periods_per_year: u32) -> Option<f64> {
    if cashflows.len() < 2 || periods_per_year == 0 {
        return None;
    }
    if cashflows.iter().any(|cf| !cf.amount.is_finite()) {
        return None;
    }

    let mut rate = initial_guess(cashflows, periods_per_year);

    for _ in 0..MAX_NEWTON_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, periods_per_year, rate);

        if npv.abs() < TOLERANCE {
            return Some(rate);
        }
        if dnpv.abs() < TOLERANCE {
            debug!("irr: derivative vanished at rate {rate}, falling back to bisection");
            return bisection(cashflows, periods_per_year)
                .or_else(|| cagr_estimate(cashflows, periods_per_year));
        }

        let next = rate - npv / dnpv;
        if next <= -1.0 || next > 10.0 {
            debug!("irr: Newton step left the sane range at {next}, falling back to bisection");
            return bisection(cashflows, periods_per_year)
                .or_else(|| cagr_estimate(cashflows, periods_per_year));
        }
        if (next - rate).abs() < TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    debug!("irr: Newton did not converge, falling back to bisection");
    bisection(cashflows, periods_per_year).or_else(|| cagr_estimate(cashflows, periods_per_year))
}

/// NPV and its derivative with respect to the annual rate, with flow times
/// expressed in years.
fn npv_and_derivative(cashflows: &[CashFlow], periods_per_year: u32, rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for cf in cashflows {
        let t = cf.years(periods_per_year);
        let discount = (1.0 + rate).powf(t);
        npv += cf.amount / discount;
        if t > 0.0 {
            dnpv -= t * cf.amount / (1.0 + rate).powf(t + 1.0);
        }
    }

    (npv, dnpv)
}

fn npv_at(cashflows: &[CashFlow], periods_per_year: u32, rate: f64) -> f64 {
    npv_and_derivative(cashflows, periods_per_year, rate).0
}

/// Informed starting rate: the ratio of total inflows to total outflows,
/// annualized over the flow span.
fn initial_guess(cashflows: &[CashFlow], periods_per_year: u32) -> f64 {
    let outflows: f64 = cashflows
        .iter()
        .filter(|cf| cf.amount < 0.0)
        .map(|cf| -cf.amount)
        .sum();
    let inflows: f64 = cashflows
        .iter()
        .filter(|cf| cf.amount > 0.0)
        .map(|cf| cf.amount)
        .sum();

    let first = cashflows.iter().map(|cf| cf.period_offset).min().unwrap_or(0);
    let last = cashflows.iter().map(|cf| cf.period_offset).max().unwrap_or(0);
    let span_years = (last - first) as f64 / periods_per_year as f64;

    if outflows > 0.0 && inflows > 0.0 && span_years > 0.0 {
        ((inflows / outflows).powf(1.0 / span_years) - 1.0).clamp(-0.5, 1.0)
    } else {
        0.05
    }
}

/// Bisection fallback on `[BRACKET_LO, BRACKET_HI]`, doubling the upper
/// bound a bounded number of times while the bracket holds no sign change.
fn bisection(cashflows: &[CashFlow], periods_per_year: u32) -> Option<f64> {
    let mut lo = BRACKET_LO;
    let mut hi = BRACKET_HI;
    let mut npv_lo = npv_at(cashflows, periods_per_year, lo);
    let mut npv_hi = npv_at(cashflows, periods_per_year, hi);

    let mut expansions = 0;
    while npv_lo * npv_hi > 0.0 {
        if expansions >= MAX_BRACKET_EXPANSIONS {
            debug!("irr: no sign change after {expansions} bracket expansions");
            return None;
        }
        hi *= 2.0;
        npv_hi = npv_at(cashflows, periods_per_year, hi);
        expansions += 1;
    }

    for _ in 0..MAX_BISECTION_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let npv_mid = npv_at(cashflows, periods_per_year, mid);

        if npv_mid.abs() < TOLERANCE || (hi - lo) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            npv_lo = npv_mid;
        }
    }

    Some((lo + hi) / 2.0)
}

/// Closed-form CAGR from the first (negative) and last (positive) cash flow,
/// when that sign pattern exists.
fn cagr_estimate(cashflows: &[CashFlow], periods_per_year: u32) -> Option<f64> {
    let first = cashflows.iter().find(|cf| cf.amount < 0.0)?;
    let last = cashflows.iter().rev().find(|cf| cf.amount > 0.0)?;

    let span_years = (last.years(periods_per_year) - first.years(periods_per_year)).max(0.0);
    if span_years == 0.0 {
        return None;
    }

    let rate = (last.amount / -first.amount).powf(1.0 / span_years) - 1.0;
    if rate.is_finite() {
        debug!("irr: using CAGR estimate {rate}");
        Some(rate)
    } else {
        None
    }
}
