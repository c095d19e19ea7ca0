use crate::{
    Branch, Equation, Expr, Roots, SolveError, Solver, SolverOptions, System, solve, symb,
    symbol_exists,
};

#[test]
fn test_builder_configuration() {
    // Defaults
    let solver = Solver::new();
    assert_eq!(solver.options(), &SolverOptions::default());
    assert!((solver.options().precision - 1e-5).abs() < f64::EPSILON);
    assert!(solver.options().numeric_fallback);

    let tuned = Solver::new()
        .precision(1e-9)
        .max_iterations(25)
        .max_start_search(3)
        .consistency_tolerance(1e-2)
        .numeric_fallback(false);
    let opts = tuned.options();
    assert_eq!(opts.max_iterations, 25);
    assert_eq!(opts.max_start_search, 3);
    assert!(!opts.numeric_fallback);

    let same = Solver::with_options(*opts);
    assert_eq!(same.options(), opts);
}

#[test]
fn test_expression_converts_to_equation() {
    let x = symb("x");
    let from_expr = solve(x.clone() - 4.0, &x).unwrap();
    let from_equation = solve(Equation::new(x.clone(), 4.0), &x).unwrap();
    assert_eq!(from_expr, from_equation);
}

#[test]
fn test_roots_and_branch_accessors() {
    let x = symb("x");
    let roots: Roots = vec![Equation::new(x.clone(), 1.0), Equation::new(x.clone(), 2.0)].into();
    let values: Vec<&Expr> = roots.values().collect();
    assert_eq!(values, vec![&Expr::number(1.0), &Expr::number(2.0)]);
    assert_eq!(roots.to_string(), "{x = 1, x = 2}");

    let branch: Branch = std::iter::once(Equation::new(x.clone(), 7.0)).collect();
    assert_eq!(branch.value_of("x"), Some(&Expr::number(7.0)));
    assert_eq!(branch.value_of("y"), None);
}

#[test]
fn test_system_building() {
    let (x, y) = (symb("x"), symb("y"));
    let mut system = System::new();
    system.push(x.clone() + &y);
    system.push(Equation::new(x.clone(), 2.0));
    assert_eq!(system.len(), 2);
    assert_eq!(system.as_slice()[0].rhs(), &Expr::number(0.0));

    let branches = Solver::new().solve_system(&system, &[x, y]).unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].value_of("y"), Some(&Expr::number(-2.0)));
}

#[test]
fn test_symbol_interning() {
    let a = symb("api_interned_symbol");
    assert!(symbol_exists("api_interned_symbol"));
    assert_eq!(a, symb("api_interned_symbol"));
    assert!(crate::symbol_count() > 0);
}

#[test]
fn test_errors_are_displayable() {
    let err = SolveError::InvalidUnknown {
        unknown: "2".to_string(),
    };
    assert_eq!(err.to_string(), "unknown must be a symbol, got `2`");
    let err = SolveError::DuplicateUnknown {
        unknown: "x".to_string(),
    };
    assert_eq!(err.to_string(), "unknown `x` listed more than once");
}
