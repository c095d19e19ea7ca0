//! Equations with the unknown in a denominator
//!
//! `e(x) = 0` with a term in a negative power of `x` is multiplied through by
//! `x` and solved again; `x^-k` clears after `k` passes. The multiplication
//! adds the root `x = 0`, which is removed.

use tracing::trace;

use super::Solver;
use super::strategy::{SolveStrategy, Unknown};
use crate::{Expr, Roots, SolveError};

pub(crate) struct InverseStrategy;

impl SolveStrategy for InverseStrategy {
    fn name(&self) -> &'static str {
        "inverse"
    }

    fn apply(
        &self,
        expr: &Expr,
        unknown: &Unknown,
        solver: &Solver,
    ) -> Option<Result<Roots, SolveError>> {
        let lowest = expr.lowest_negative_power(unknown.name())?;
        let cleared = (unknown.expr() * expr).expand();
        trace!(%cleared, lowest, "cleared denominator");

        Some(solver.solve_residual(&cleared, unknown).map(|roots| {
            roots
                .into_iter()
                .filter(|eq| !eq.rhs().is_identically_zero())
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn apply(expr: &Expr) -> Option<Roots> {
        let unknown = Unknown::new(&x()).expect("x is a symbol");
        InverseStrategy
            .apply(expr, &unknown, &Solver::new())
            .map(|r| r.expect("solvable"))
    }

    #[test]
    fn test_spurious_zero_removed() {
        // x + 1/x - 2 = 0  ->  x^2 - 2x + 1 = 0
        let roots = apply(&(x() + 1.0 / x() - 2.0)).expect("applies");
        assert_eq!(roots.values().collect::<Vec<_>>(), vec![&Expr::number(1.0)]);

        // 1 - 1/x = 0 -> x - 1 = 0
        let roots = apply(&(1.0 - 1.0 / x())).expect("applies");
        assert_eq!(roots.values().collect::<Vec<_>>(), vec![&Expr::number(1.0)]);
    }

    #[test]
    fn test_higher_negative_powers_keep_both_roots() {
        // 1/x^2 - 4 = 0 -> x = 1/2, x = -1/2
        let roots = apply(&(1.0 / x().pow_of(2.0) - 4.0)).expect("applies");
        let mut values: Vec<f64> = roots
            .values()
            .map(|v| v.as_number().expect("numeric root"))
            .collect();
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![-0.5, 0.5]);

        // x^-3 = 8 -> x = 1/2 among the cube roots
        let roots = apply(&(x().pow_of(-3.0) - 8.0)).expect("applies");
        assert_eq!(roots.len(), 3);
        let near_half = roots.values().any(|v| {
            let z = v.eval_constant().expect("closed form evaluates");
            (z.re - 0.5).abs() < 1e-9 && z.im.abs() < 1e-9
        });
        assert!(near_half);
    }

    #[test]
    fn test_no_solution() {
        let roots = apply(&(1.0 / x())).expect("applies");
        assert!(roots.is_empty());
    }

    #[test]
    fn test_declines_without_reciprocal() {
        assert!(apply(&(x() - 1.0)).is_none());
        assert!(apply(&(x().exp() - 1.0)).is_none());
    }
}
