//! Errors reported by the solvers.
//!
//! "No closed-form strategy applies" is not an error: the solvers return an
//! empty root list for that. Errors are reserved for bad input and for the
//! numeric fallback giving up.

use thiserror::Error;

/// Errors that can occur while solving
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The unknown is not a plain symbol (e.g. `x + 1` or `3`)
    #[error("unknown must be a symbol, got `{unknown}`")]
    InvalidUnknown { unknown: String },

    /// The same unknown was listed twice for a system
    #[error("unknown `{unknown}` listed more than once")]
    DuplicateUnknown { unknown: String },

    /// Numeric fallback needs an expression that evaluates to a number once
    /// the unknown is fixed
    #[error("`{expr}` does not evaluate to a number in `{unknown}`")]
    NonNumeric { expr: String, unknown: String },

    /// No usable Newton starting point was found
    #[error("no starting point with nonzero derivative found for `{expr}` after {attempts} attempts")]
    NoStartingPoint { expr: String, attempts: usize },

    /// Newton iteration did not reach the requested precision
    #[error("Newton iteration for `{expr}` did not converge after {iterations} iterations")]
    DidNotConverge { expr: String, iterations: usize },
}
