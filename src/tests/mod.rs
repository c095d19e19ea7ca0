mod numeric_tests;
mod rust_api_tests;

use num_complex::Complex64;

use crate::Expr;

/// Route `tracing` output through the test harness; repeated calls are no-ops
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Numeric value of a closed-form root
pub(crate) fn numeric(expr: &Expr) -> Complex64 {
    expr.eval_constant()
        .unwrap_or_else(|| panic!("`{expr}` should evaluate to a number"))
}

/// `|f(value)|` for a numeric `value` of `var`
pub(crate) fn residual_at(f: &Expr, var: &str, value: &Expr) -> f64 {
    f.substitute(var, value)
        .eval_constant()
        .unwrap_or_else(|| panic!("`{f}` at {var} = {value} should evaluate"))
        .norm()
}
