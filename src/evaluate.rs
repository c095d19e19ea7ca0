//! Numeric evaluation on the complex plane
//!
//! Principal branches throughout (`ln`, non-integer powers). Evaluation
//! returns `None` as soon as a free symbol, an unknown function or an
//! unevaluated derivative is reached.

use std::f64::consts::{E, PI};

use num_complex::Complex64;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;

use crate::core::known_symbols as ks;
use crate::core::traits::as_small_integer;
use crate::functions::registry::Registry;
use crate::{Expr, ExprKind};

impl Expr {
    /// Evaluate with the given symbol values
    pub fn eval_complex(&self, bindings: &FxHashMap<&str, Complex64>) -> Option<Complex64> {
        match &self.kind {
            ExprKind::Number(n) => Some(Complex64::new(*n, 0.0)),
            ExprKind::Symbol(s) => {
                if let Some(value) = bindings.get(s.name()) {
                    return Some(*value);
                }
                match s.name() {
                    ks::E => Some(Complex64::new(E, 0.0)),
                    ks::PI => Some(Complex64::new(PI, 0.0)),
                    ks::I => Some(Complex64::i()),
                    _ => None,
                }
            }
            ExprKind::Sum(terms) => terms
                .iter()
                .try_fold(Complex64::zero(), |acc, t| Some(acc + t.eval_complex(bindings)?)),
            ExprKind::Product(factors) => factors
                .iter()
                .try_fold(Complex64::one(), |acc, f| Some(acc * f.eval_complex(bindings)?)),
            ExprKind::Pow(base, exp) => {
                let b = base.eval_complex(bindings)?;
                let e = exp.eval_complex(bindings)?;
                Some(complex_pow(b, e))
            }
            ExprKind::FunctionCall { name, args } => {
                let def = Registry::get(name.name())?;
                if !def.validate_arity(args.len()) {
                    return None;
                }
                let values = args
                    .iter()
                    .map(|a| a.eval_complex(bindings))
                    .collect::<Option<Vec<_>>>()?;
                (def.eval)(&values)
            }
            ExprKind::Derivative { .. } => None,
        }
    }

    /// Evaluate with a single symbol bound
    ///
    /// # Example
    /// ```
    /// use num_complex::Complex64;
    /// use symb_solve::symb;
    /// let x = symb("x");
    /// let f = x.clone() * x + 1.0;
    /// let value = f.evaluate_at("x", Complex64::new(2.0, 0.0)).unwrap();
    /// assert_eq!(value, Complex64::new(5.0, 0.0));
    /// ```
    pub fn evaluate_at(&self, var: &str, value: Complex64) -> Option<Complex64> {
        let mut bindings = FxHashMap::default();
        bindings.insert(var, value);
        self.eval_complex(&bindings)
    }

    /// Evaluate an expression with no free symbols
    pub fn eval_constant(&self) -> Option<Complex64> {
        self.eval_complex(&FxHashMap::default())
    }
}

fn complex_pow(base: Complex64, exp: Complex64) -> Complex64 {
    if exp.im == 0.0 {
        if let Some(n) = as_small_integer(exp.re) {
            return base.powi(n);
        }
        if base.im == 0.0 && base.re >= 0.0 {
            return Complex64::new(base.re.powf(exp.re), 0.0);
        }
    }
    if base.is_zero() {
        return if exp.re > 0.0 {
            Complex64::zero()
        } else {
            Complex64::new(f64::INFINITY, 0.0)
        };
    }
    base.powc(exp)
}
