//! Symbolic Equation Solving Library
//!
//! Solves single equations and systems of equations over symbolic
//! expressions, in closed form where it can and numerically where it must.
//!
//! # Features
//! - Canonical expression building with operator overloading
//! - Closed forms for polynomials up to degree 3 (Cardano for cubics)
//! - Single-exponential equations (`b*exp(a*x) + c = 0` and friends)
//! - Equations with the unknown in a denominator
//! - Bounded Newton-Raphson fallback on the complex plane
//! - Systems by recursive substitution, with free variables kept symbolic
//! - **Builder pattern API** for solver configuration
//!
//! # Usage Examples
//!
//! ## Single equation
//! ```
//! use symb_solve::{Expr, solve, symb};
//! let x = symb("x");
//! let roots = solve(2.0 * x.clone().exp() - 6.0, &x).unwrap();
//! assert_eq!(roots.values().next(), Some(&Expr::number(3.0).ln()));
//! ```
//!
//! ## System
//! ```
//! use symb_solve::{Equation, Expr, System, solve_system, symb};
//! let (x, y) = (symb("x"), symb("y"));
//! let system: System = vec![
//!     Equation::new(x.clone() + &y, 3.0),
//!     Equation::new(x.clone() - &y, 1.0),
//! ]
//! .into();
//! let branches = solve_system(&system, &[x, y]).unwrap();
//! assert_eq!(branches.len(), 1);
//! assert_eq!(branches[0].value_of("x"), Some(&Expr::number(2.0)));
//! ```

mod core;
mod differentiation;
mod equation;
mod evaluate;
mod functions;
pub mod pattern;
mod polynomial;
mod solver;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use crate::core::{Expr, ExprKind, InternedSymbol, SolveError, symbol_count, symbol_exists};
pub use equation::{
    Alternatives, Assignment, Branch, Conjunction, Equation, EquationList, Roots,
    SolutionBranchList, System,
};
pub use num_complex::Complex64;
pub use solver::{Solver, SolverOptions};

/// Create a symbol expression
///
/// # Example
/// ```
/// use symb_solve::symb;
/// let x = symb("x");
/// assert_eq!(x.to_string(), "x");
/// ```
pub fn symb(name: &str) -> Expr {
    Expr::symbol(name)
}

/// Solve one equation for one unknown with default settings
///
/// See [`Solver::solve`] for details and configuration.
///
/// # Errors
/// See [`Solver::solve`].
pub fn solve(equation: impl Into<Equation>, unknown: &Expr) -> Result<Roots, SolveError> {
    Solver::new().solve(equation, unknown)
}

/// Solve a system of equations for the given unknowns with default settings
///
/// # Errors
/// See [`Solver::solve_system`].
pub fn solve_system(system: &System, unknowns: &[Expr]) -> Result<SolutionBranchList, SolveError> {
    Solver::new().solve_system(system, unknowns)
}
