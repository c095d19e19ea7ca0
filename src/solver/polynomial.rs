//! Closed forms for polynomials of degree 0 to 3

use super::Solver;
use super::strategy::{SolveStrategy, Unknown};
use crate::{Expr, Roots, SolveError};

pub(crate) struct PolynomialStrategy;

impl SolveStrategy for PolynomialStrategy {
    fn name(&self) -> &'static str {
        "polynomial"
    }

    fn apply(
        &self,
        expr: &Expr,
        unknown: &Unknown,
        _solver: &Solver,
    ) -> Option<Result<Roots, SolveError>> {
        solve_polynomial(expr, unknown).map(Ok)
    }
}

/// Degree of `expr` in `var`, read off from how many derivatives it takes to
/// vanish. Degree 0 means `expr` is identically zero; a nonzero constant
/// reports degree 1 with a zero leading coefficient.
fn polynomial_degree(expr: &Expr, var: &str) -> Option<u32> {
    if expr.is_identically_zero() {
        return Some(0);
    }
    let first = expr.diff(var);
    let mut derivative = first.diff(var);
    for degree in 1..=3 {
        if derivative.is_identically_zero() {
            return Some(degree);
        }
        derivative = derivative.diff(var);
    }
    None
}

/// Solve `expr = 0` when it is a polynomial of degree at most 3 in the unknown
pub(crate) fn solve_polynomial(expr: &Expr, unknown: &Unknown) -> Option<Roots> {
    let var = unknown.name();
    let expr = expr.expand();
    let degree = polynomial_degree(&expr, var)?;

    let values = match degree {
        0 => vec![unknown.expr().clone()],
        1 => linear(&expr, var),
        2 => quadratic(
            &expr.coefficient(var, 2),
            &expr.coefficient(var, 1),
            &expr.coefficient(var, 0),
        ),
        _ => cubic(&expr, var),
    };

    let mut roots = Roots::new();
    let mut seen: Vec<Expr> = Vec::with_capacity(values.len());
    for value in values {
        // A double root is reported once
        if !seen.contains(&value) {
            seen.push(value.clone());
            roots.push(unknown.bind(value));
        }
    }
    Some(roots)
}

/// `a*x + b = 0`
fn linear(expr: &Expr, var: &str) -> Vec<Expr> {
    let a = expr.coefficient(var, 1);
    let b = expr.coefficient(var, 0);
    if a.is_identically_zero() {
        // Nonzero constant: no value of the unknown helps
        return Vec::new();
    }
    vec![-b / a]
}

/// `a*x^2 + b*x + c = 0`
fn quadratic(a: &Expr, b: &Expr, c: &Expr) -> Vec<Expr> {
    let discriminant = b.clone().pow_of(2.0) - 4.0 * a * c;
    let root = discriminant.sqrt();
    let two_a = 2.0 * a;
    vec![
        (-b + &root) / &two_a,
        (-b - root) / two_a,
    ]
}

/// Cardano's method on the monic form `x^3 + a1*x^2 + a2*x + a3`
fn cubic(expr: &Expr, var: &str) -> Vec<Expr> {
    let lead = expr.coefficient(var, 3);
    let a1 = expr.coefficient(var, 2) / &lead;
    let a2 = expr.coefficient(var, 1) / &lead;
    let a3 = expr.coefficient(var, 0) / lead;

    let q = (3.0 * &a2 - a1.clone().pow_of(2.0)) / 9.0;
    let r = (9.0 * &a1 * &a2 - 27.0 * a3 - 2.0 * a1.clone().pow_of(3.0)) / 54.0;
    let d_sqrt = (q.clone().pow_of(3.0) + r.clone().pow_of(2.0)).sqrt();

    let s1 = (&r + &d_sqrt).pow_of(1.0 / 3.0);
    // S1*S2 = -Q picks the cube root of S2 that matches S1
    let s2 = if q.is_identically_zero() {
        (r - d_sqrt).pow_of(1.0 / 3.0)
    } else {
        -q / &s1
    };

    let shift = a1 / 3.0;
    let sum = &s1 + &s2;
    let rotation = Expr::imaginary_unit() * Expr::number(3.0).sqrt() / 2.0 * (s1 - s2);
    let mid = -(&sum) / 2.0 - &shift;

    vec![sum - shift, &mid + &rotation, mid - rotation]
}
