//! Newton-Raphson fallback
//!
//! Both loops are bounded: the search for a starting point with a nonzero
//! derivative (x = 0, 1, 2, ...) and the iteration itself. Arithmetic is
//! complex, so iterates may leave the real line.

use num_complex::Complex64;
use tracing::{trace, warn};

use super::Solver;
use super::strategy::{SolveStrategy, Unknown};
use crate::core::traits::FLOAT_TOLERANCE;
use crate::{Expr, Roots, SolveError};

pub(crate) struct NumericFallbackStrategy;

impl SolveStrategy for NumericFallbackStrategy {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn apply(
        &self,
        expr: &Expr,
        unknown: &Unknown,
        solver: &Solver,
    ) -> Option<Result<Roots, SolveError>> {
        Some(newton(expr, unknown, solver).map(|value| {
            let mut roots = Roots::new();
            roots.push(unknown.bind(value));
            roots
        }))
    }

    fn is_numeric(&self) -> bool {
        true
    }
}

fn is_finite(z: Complex64) -> bool {
    z.re.is_finite() && z.im.is_finite()
}

/// `f(z)` and `f'(z)`, or `NonNumeric` when either does not evaluate
fn evaluate_pair(
    f: &Expr,
    df: &Expr,
    unknown: &Unknown,
    z: Complex64,
) -> Result<(Complex64, Complex64), SolveError> {
    let non_numeric = || SolveError::NonNumeric {
        expr: f.to_string(),
        unknown: unknown.name().to_string(),
    };
    let value = f.evaluate_at(unknown.name(), z).ok_or_else(non_numeric)?;
    let slope = df.evaluate_at(unknown.name(), z).ok_or_else(non_numeric)?;
    Ok((value, slope))
}

fn newton(f: &Expr, unknown: &Unknown, solver: &Solver) -> Result<Expr, SolveError> {
    let options = solver.options();
    let df = f.diff(unknown.name());

    let mut start = None;
    for attempt in 0..options.max_start_search {
        #[allow(clippy::cast_precision_loss)]
        let z = Complex64::new(attempt as f64, 0.0);
        let (value, slope) = evaluate_pair(f, &df, unknown, z)?;
        if is_finite(value) && is_finite(slope) && slope.norm() > FLOAT_TOLERANCE {
            start = Some((z, value, slope));
            break;
        }
    }
    let Some((mut z, mut value, mut slope)) = start else {
        warn!(%f, attempts = options.max_start_search, "no Newton starting point");
        return Err(SolveError::NoStartingPoint {
            expr: f.to_string(),
            attempts: options.max_start_search,
        });
    };

    for iteration in 1..=options.max_iterations {
        let next = z - value / slope;
        trace!(iteration, re = next.re, im = next.im, "newton step");
        if !is_finite(next) {
            break;
        }
        if (next - z).norm() < options.precision {
            return Ok(to_expr(next, options.precision));
        }
        z = next;
        (value, slope) = evaluate_pair(f, &df, unknown, z)?;
    }

    warn!(%f, iterations = options.max_iterations, "Newton iteration did not converge");
    Err(SolveError::DidNotConverge {
        expr: f.to_string(),
        iterations: options.max_iterations,
    })
}

/// Real number, or `re + im*i` when the imaginary part is significant
fn to_expr(z: Complex64, precision: f64) -> Expr {
    if z.im.abs() < precision {
        Expr::number(z.re)
    } else {
        Expr::number(z.re) + Expr::number(z.im) * Expr::imaginary_unit()
    }
}
