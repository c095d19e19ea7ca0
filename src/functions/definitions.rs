//! Elementary function definitions for the function registry
//!
//! Evaluation works on the complex plane so that the numeric solver can
//! follow roots off the real line.

use std::sync::Arc;

use num_complex::Complex64;

use super::registry::FunctionDefinition;
use super::{func_arc, mul_opt};
use crate::Expr;

/// Return all function definitions for populating the registry
pub(crate) fn all_definitions() -> Vec<FunctionDefinition> {
    vec![
        // Exponential and logarithm
        FunctionDefinition {
            name: "exp",
            arity: 1..=1,
            eval: |args| Some(args[0].exp()),
            derivative: |args, arg_primes| {
                // d/dx exp(u) = exp(u) * u'
                mul_opt(func_arc("exp", &args[0]), arg_primes[0].clone())
            },
        },
        FunctionDefinition {
            name: "ln",
            arity: 1..=1,
            eval: |args| Some(args[0].ln()),
            derivative: |args, arg_primes| {
                // d/dx ln(u) = u' / u
                mul_opt(Expr::unwrap_arc(Arc::clone(&args[0])).recip(), arg_primes[0].clone())
            },
        },
        // Trigonometric
        FunctionDefinition {
            name: "sin",
            arity: 1..=1,
            eval: |args| Some(args[0].sin()),
            derivative: |args, arg_primes| {
                // d/dx sin(u) = cos(u) * u'
                mul_opt(func_arc("cos", &args[0]), arg_primes[0].clone())
            },
        },
        FunctionDefinition {
            name: "cos",
            arity: 1..=1,
            eval: |args| Some(args[0].cos()),
            derivative: |args, arg_primes| {
                // d/dx cos(u) = -sin(u) * u'
                mul_opt(func_arc("sin", &args[0]).negate(), arg_primes[0].clone())
            },
        },
        FunctionDefinition {
            name: "tan",
            arity: 1..=1,
            eval: |args| Some(args[0].tan()),
            derivative: |args, arg_primes| {
                // d/dx tan(u) = u' / cos^2(u)
                mul_opt(
                    Expr::pow(func_arc("cos", &args[0]), Expr::number(-2.0)),
                    arg_primes[0].clone(),
                )
            },
        },
        // Hyperbolic
        FunctionDefinition {
            name: "sinh",
            arity: 1..=1,
            eval: |args| Some(args[0].sinh()),
            derivative: |args, arg_primes| {
                // d/dx sinh(u) = cosh(u) * u'
                mul_opt(func_arc("cosh", &args[0]), arg_primes[0].clone())
            },
        },
        FunctionDefinition {
            name: "cosh",
            arity: 1..=1,
            eval: |args| Some(args[0].cosh()),
            derivative: |args, arg_primes| {
                // d/dx cosh(u) = sinh(u) * u'
                mul_opt(func_arc("sinh", &args[0]), arg_primes[0].clone())
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::registry::Registry;

    #[test]
    fn test_registry_lookup() {
        let exp = Registry::get("exp").expect("exp is registered");
        assert!(exp.validate_arity(1));
        assert!(!exp.validate_arity(2));
        assert!(Registry::get("besselj").is_none());
    }

    #[test]
    fn test_complex_evaluation() {
        let ln = Registry::get("ln").expect("ln is registered");
        let value = (ln.eval)(&[Complex64::new(-1.0, 0.0)]).expect("ln(-1) evaluates");
        assert!(value.re.abs() < 1e-12);
        assert!((value.im - std::f64::consts::PI).abs() < 1e-12);
    }
}
