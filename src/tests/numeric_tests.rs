//! Numeric fallback through the public solver

use super::{init_tracing, residual_at};
use crate::{Expr, SolveError, Solver, solve, symb};

#[test]
fn test_quintic_converges() {
    init_tracing();
    let x = symb("x");
    let f = x.clone().pow_of(5.0) + &x - 3.0;
    let roots = solve(f.clone(), &x).unwrap();
    assert_eq!(roots.len(), 1);
    let value = roots.values().next().unwrap();
    let real = value.as_number().expect("real root");
    assert!((real - 1.1329).abs() < 1e-3);
    assert!(residual_at(&f, "x", value) < 1e-6);
}

#[test]
fn test_transcendental_fixed_point() {
    let x = symb("x");
    let roots = Solver::new()
        .precision(1e-12)
        .solve(crate::Equation::new(x.clone().cos(), x.clone()), &x)
        .unwrap();
    let value = roots.values().next().unwrap().as_number().unwrap();
    assert!((value - 0.739_085_133_215_160_6).abs() < 1e-9);
}

#[test]
fn test_divergent_iteration_is_reported() {
    let x = symb("x");
    let err = Solver::new()
        .max_iterations(50)
        .solve(x.clone().cos() + 2.0, &x)
        .unwrap_err();
    assert!(matches!(err, SolveError::DidNotConverge { iterations: 50, .. }));
}

#[test]
fn test_flat_derivative_is_reported() {
    // d/dx (sin(pi*x)^2 + 1) vanishes at every integer
    let x = symb("x");
    let f = (Expr::pi() * &x).sin().pow_of(2.0) + 1.0;
    let err = Solver::new().max_start_search(10).solve(f, &x).unwrap_err();
    assert!(matches!(err, SolveError::NoStartingPoint { attempts: 10, .. }));
}

#[test]
fn test_symbolic_parameters_are_not_numeric() {
    let (x, a) = (symb("x"), symb("a"));
    let err = solve(x.clone().cos() - a, &x).unwrap_err();
    assert_eq!(
        err,
        SolveError::NonNumeric {
            expr: "-a + cos(x)".to_string(),
            unknown: "x".to_string()
        }
    );
}

#[test]
fn test_error_messages() {
    let err = SolveError::DidNotConverge {
        expr: "cos(x) + 2".to_string(),
        iterations: 5,
    };
    assert_eq!(
        err.to_string(),
        "Newton iteration for `cos(x) + 2` did not converge after 5 iterations"
    );
}
