//! Error taxonomy for the calculation core

use thiserror::Error;

/// Errors surfaced by the calculation core.
///
/// Only malformed input is an error. The other two "failure" shapes are
/// ordinary results so callers can render them distinctly: a break-even
/// target outside the solvable domain comes back as a
/// [`SolverOutcome`](crate::solver::SolverOutcome) with `capped: true`, and
/// an unsolvable IRR comes back as `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Non-finite or out-of-domain numeric input. Never substituted with a
    /// default inside the core.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
