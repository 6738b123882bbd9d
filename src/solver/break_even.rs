//! Bracketing/bisection break-even solver
//!
//! One primitive serves every "what value of X makes these trajectories
//! equal?" question: break-even return, required extra contribution,
//! required alpha. Call sites parameterize the function, the target, and the
//! domain instead of re-deriving the bisection loop per calculator.

use serde::{Deserialize, Serialize};

/// Iteration budget sufficient for 1e-15-scale convergence on a [0,1]-ish
/// domain.
pub const DEFAULT_BISECTION_ITERATIONS: u32 = 64;

/// Result of a break-even solve.
///
/// `capped` marks a target outside the solvable domain: the returned value is
/// the domain bound, and callers should render it as "at least/at most the
/// bound" rather than a false precise answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOutcome {
    /// Solved parameter value, always within the requested domain
    pub value: f64,

    /// True when the target is unreachable within the domain
    pub capped: bool,
}

/// Find the value in `[lo, hi]` at which a monotonic non-decreasing function
/// reaches a target.
///
/// If `f(hi)` still falls short of the target the domain cannot reach it and
/// the result is `{hi, capped: true}`; if `f(lo)` already exceeds it the
/// result is `{lo, capped: true}`. Otherwise bisection runs for the fixed
/// iteration budget, maintaining `f(lo) <= target <= f(hi)`, and returns the
/// upper bound of the final bracket.
pub fn solve_break_even<F>(f: F, target: f64, lo: f64, hi: f64, iterations: u32) -> SolverOutcome
where
    F: Fn(f64) -> f64,
{
    if f(hi) < target {
        return SolverOutcome { value: hi, capped: true };
    }
    if f(lo) > target {
        return SolverOutcome { value: lo, capped: true };
    }

    let mut lo = lo;
    let mut hi = hi;
    for _ in 0..iterations {
        let mid = (lo + hi) / 2.0;
        if f(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    SolverOutcome { value: hi, capped: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_known_root() {
        // x^2 is monotone on [0, 10]; target 25 -> 5
        let outcome = solve_break_even(|x| x * x, 25.0, 0.0, 10.0, DEFAULT_BISECTION_ITERATIONS);
        assert!(!outcome.capped);
        assert!((outcome.value - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_unreachable_target_is_capped_at_hi() {
        let outcome = solve_break_even(|x| x, 20.0, 0.0, 10.0, DEFAULT_BISECTION_ITERATIONS);
        assert_eq!(outcome.value, 10.0);
        assert!(outcome.capped);
    }

    #[test]
    fn test_exceeded_floor_is_capped_at_lo() {
        let outcome = solve_break_even(|x| x + 5.0, 2.0, 0.0, 10.0, DEFAULT_BISECTION_ITERATIONS);
        assert_eq!(outcome.value, 0.0);
        assert!(outcome.capped);
    }

    #[test]
    fn test_result_stays_inside_bracket() {
        for target in [0.1, 3.7, 9.9] {
            let outcome =
                solve_break_even(|x| x, target, 0.0, 10.0, DEFAULT_BISECTION_ITERATIONS);
            assert!(outcome.value >= 0.0 && outcome.value <= 10.0);
            assert!(!outcome.capped);
            assert!((outcome.value - target).abs() < 1e-9);
        }
    }

    #[test]
    fn test_target_at_bounds_is_not_capped() {
        let outcome = solve_break_even(|x| x, 10.0, 0.0, 10.0, DEFAULT_BISECTION_ITERATIONS);
        assert!(!outcome.capped);
        assert!((outcome.value - 10.0).abs() < 1e-9);

        let outcome = solve_break_even(|x| x, 0.0, 0.0, 10.0, DEFAULT_BISECTION_ITERATIONS);
        assert!(!outcome.capped);
        assert!(outcome.value.abs() < 1e-9);
    }
}
