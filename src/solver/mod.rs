//! Single-equation and system solvers
//!
//! # Example
//! ```
//! use symb_solve::{Solver, symb};
//!
//! let x = symb("x");
//! let roots = Solver::new()
//!     .precision(1e-8)
//!     .solve(x.clone().pow_of(2.0) - 5.0 * &x + 6.0, &x)
//!     .unwrap();
//! assert_eq!(roots.len(), 2);
//! ```

mod exponential;
mod inverse;
mod numeric;
mod polynomial;
mod strategy;
mod system;

use tracing::{debug, trace};

use crate::{Equation, Expr, Roots, SolutionBranchList, SolveError, System};
use strategy::{STRATEGIES, Unknown};

/// Numeric limits and switches used while solving
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Newton stops once two iterates are closer than this
    pub precision: f64,
    /// Newton iteration cap
    pub max_iterations: usize,
    /// How many integer starting points Newton tries
    pub max_start_search: usize,
    /// Largest residual magnitude still treated as zero when a system's
    /// remaining equations are checked
    pub consistency_tolerance: f64,
    /// Whether Newton runs when no closed form applies
    pub numeric_fallback: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            precision: 1e-5,
            max_iterations: 1000,
            max_start_search: 1000,
            consistency_tolerance: 1e-6,
            numeric_fallback: true,
        }
    }
}

/// Builder for solving equations and systems
///
/// Defaults are those of [`SolverOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct Solver {
    options: SolverOptions,
}

impl Solver {
    /// Create a new solver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver from a complete set of options
    pub fn with_options(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Set Newton's stopping precision
    pub fn precision(mut self, precision: f64) -> Self {
        self.options.precision = precision;
        self
    }

    /// Set Newton's iteration cap
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.options.max_iterations = iterations;
        self
    }

    /// Set how many starting points Newton tries
    pub fn max_start_search(mut self, attempts: usize) -> Self {
        self.options.max_start_search = attempts;
        self
    }

    /// Set the tolerance for leftover equations in systems
    pub fn consistency_tolerance(mut self, tolerance: f64) -> Self {
        self.options.consistency_tolerance = tolerance;
        self
    }

    /// Enable or disable the numeric fallback
    pub fn numeric_fallback(mut self, enabled: bool) -> Self {
        self.options.numeric_fallback = enabled;
        self
    }

    /// Solve `equation` for `unknown`.
    ///
    /// An empty result means no strategy found a solution. That covers both
    /// equations without solutions and equations outside what the strategies
    /// handle.
    ///
    /// # Errors
    /// `InvalidUnknown` if `unknown` is not a symbol; numeric fallback errors
    /// when Newton iteration was needed and failed.
    pub fn solve(&self, equation: impl Into<Equation>, unknown: &Expr) -> Result<Roots, SolveError> {
        let unknown = Unknown::new(unknown)?;
        let equation = equation.into();
        debug!(%equation, unknown = unknown.name(), "solving equation");
        self.solve_residual(&equation.residual(), &unknown)
    }

    /// Solve `system` for `unknowns`, returning alternative complete solutions.
    ///
    /// # Errors
    /// `InvalidUnknown` / `DuplicateUnknown` for bad unknown lists, and any
    /// error raised while solving one of the equations.
    pub fn solve_system(
        &self,
        system: &System,
        unknowns: &[Expr],
    ) -> Result<SolutionBranchList, SolveError> {
        system::solve_system(self, system, unknowns)
    }

    /// Run the strategies in order on `expr = 0`; the first that applies wins
    pub(crate) fn solve_residual(&self, expr: &Expr, unknown: &Unknown) -> Result<Roots, SolveError> {
        for strategy in STRATEGIES.iter() {
            if strategy.is_numeric() && !self.options.numeric_fallback {
                trace!(strategy = strategy.name(), "numeric fallback disabled");
                continue;
            }
            if let Some(result) = strategy.apply(expr, unknown, self) {
                debug!(
                    strategy = strategy.name(),
                    %expr,
                    unknown = unknown.name(),
                    ok = result.is_ok(),
                    "strategy applied"
                );
                return result;
            }
            trace!(strategy = strategy.name(), %expr, "strategy declined");
        }
        debug!(%expr, unknown = unknown.name(), "no strategy applies");
        Ok(Roots::new())
    }
}
