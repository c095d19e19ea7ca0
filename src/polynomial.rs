//! On-demand polynomial view of expressions
//!
//! Expressions are not stored as polynomials. When the solver needs one
//! (degree checks, coefficient queries) the expression is expanded into a sum
//! of monomials and read off term by term. Sub-expressions in which the
//! variable appears non-polynomially (`exp(x)`, `x^y`) belong to no power.

use crate::core::traits::as_small_integer;
use crate::{Expr, ExprKind};

/// Largest integer power of a sum that `expand` multiplies out
const MAX_EXPAND_POWER: i32 = 32;

impl Expr {
    /// Multiply out products of sums and small positive integer powers of sums
    ///
    /// # Example
    /// ```
    /// use symb_solve::symb;
    /// let x = symb("x");
    /// let square = (x.clone() + 1.0).pow_of(2.0);
    /// assert_eq!(square.expand(), x.clone().pow_of(2.0) + 2.0 * x + 1.0);
    /// ```
    pub fn expand(&self) -> Expr {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Symbol(_) | ExprKind::Derivative { .. } => {
                self.clone()
            }
            ExprKind::Sum(terms) => Expr::sum(terms.iter().map(|t| t.expand()).collect()),
            ExprKind::Product(factors) => {
                let expanded: Vec<Expr> = factors.iter().map(|f| f.expand()).collect();
                distribute(&expanded)
            }
            ExprKind::Pow(base, exp) => {
                let base = base.expand();
                let exp = exp.expand();
                let power = exp.as_number().and_then(as_small_integer);
                match (&base.kind, power) {
                    (ExprKind::Sum(_), Some(n)) if (2..=MAX_EXPAND_POWER).contains(&n) => {
                        #[allow(clippy::cast_sign_loss)]
                        let copies = vec![base; n as usize];
                        distribute(&copies)
                    }
                    _ => {
                        let rebuilt = Expr::pow(base, exp);
                        // (2*(x+1))^2 distributes into 4*(x+1)^2, which expands further
                        if matches!(rebuilt.kind, ExprKind::Product(_)) {
                            rebuilt.expand()
                        } else {
                            rebuilt
                        }
                    }
                }
            }
            ExprKind::FunctionCall { name, args } => {
                Expr::func_multi(name.name(), args.iter().map(|a| a.expand()).collect())
            }
        }
    }

    /// Coefficient of `var^power` in the expansion of `self`
    ///
    /// The coefficient may itself be symbolic: the coefficient of `x` in
    /// `a*x + b*x + c` is `a + b`.
    pub fn coefficient(&self, var: &str, power: i32) -> Expr {
        let expanded = self.expand();
        let terms: Vec<Expr> = match &expanded.kind {
            ExprKind::Sum(terms) => terms.iter().map(|t| (**t).clone()).collect(),
            _ => vec![expanded],
        };
        Expr::sum(
            terms
                .iter()
                .filter_map(|t| monomial_in(t, var))
                .filter(|(k, _)| *k == power)
                .map(|(_, c)| c)
                .collect(),
        )
    }

    /// Most negative power of `var` among the polynomial terms of the
    /// expansion, if any term has a negative power
    pub fn lowest_negative_power(&self, var: &str) -> Option<i32> {
        let expanded = self.expand();
        let terms: Vec<Expr> = match &expanded.kind {
            ExprKind::Sum(terms) => terms.iter().map(|t| (**t).clone()).collect(),
            _ => vec![expanded],
        };
        terms
            .iter()
            .filter_map(|t| monomial_in(t, var))
            .filter(|(k, c)| *k < 0 && !c.is_identically_zero())
            .map(|(k, _)| k)
            .min()
    }

    /// True when the expression expands to the number zero
    pub fn is_identically_zero(&self) -> bool {
        self.is_zero_num() || self.expand().is_zero_num()
    }
}

/// Multiply a list of factors, distributing over every sum among them
fn distribute(factors: &[Expr]) -> Expr {
    let mut acc: Vec<Expr> = vec![Expr::number(1.0)];
    for factor in factors {
        acc = match &factor.kind {
            ExprKind::Sum(terms) => acc
                .iter()
                .flat_map(|a| {
                    terms
                        .iter()
                        .map(move |t| Expr::product(vec![a.clone(), (**t).clone()]))
                })
                .collect(),
            _ => acc
                .into_iter()
                .map(|a| Expr::product(vec![a, factor.clone()]))
                .collect(),
        };
    }
    Expr::sum(acc)
}

/// Read `term` as `c * var^k` with `c` free of `var`
fn monomial_in(term: &Expr, var: &str) -> Option<(i32, Expr)> {
    if !term.contains_var(var) {
        return Some((0, term.clone()));
    }
    match &term.kind {
        ExprKind::Symbol(_) => Some((1, Expr::number(1.0))),
        ExprKind::Pow(base, exp) if base.is_symbol(var) && !exp.contains_var(var) => exp
            .as_number()
            .and_then(as_small_integer)
            .map(|k| (k, Expr::number(1.0))),
        ExprKind::Product(factors) => {
            let mut power = None;
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                if factor.contains_var(var) {
                    if power.is_some() {
                        return None;
                    }
                    let (k, c) = monomial_in(factor, var)?;
                    power = Some(k);
                    rest.push(c);
                } else {
                    rest.push((**factor).clone());
                }
            }
            power.map(|k| (k, Expr::product(rest)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::Expr;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_expand_product_of_sums() {
        let p = (x() - 1.0) * (x() - 2.0);
        assert_eq!(p.expand(), x().pow_of(2.0) - 3.0 * x() + 2.0);
    }

    #[test]
    fn test_expand_leaves_functions_alone() {
        let e = x().exp() * (x() + 1.0);
        assert_eq!(e.expand(), x() * x().exp() + x().exp());
    }

    #[test]
    fn test_coefficients() {
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let p = a.clone() * x().pow_of(2.0) + b.clone() * x() + 3.0 * x() - 7.0;
        assert_eq!(p.coefficient("x", 2), a);
        assert_eq!(p.coefficient("x", 1), b + 3.0);
        assert_eq!(p.coefficient("x", 0), Expr::number(-7.0));
        assert!(p.coefficient("x", 3).is_zero_num());
    }

    #[test]
    fn test_negative_power_coefficient() {
        let e = x() + 1.0 / x() - 2.0;
        assert!(e.coefficient("x", -1).is_one_num());
        assert!(x().exp().coefficient("x", -1).is_zero_num());
    }

    #[test]
    fn test_lowest_negative_power() {
        let e = x().pow_of(-3.0) + 1.0 / x() - 4.0;
        assert_eq!(e.lowest_negative_power("x"), Some(-3));
        assert_eq!((x().pow_of(-2.0) - 4.0).lowest_negative_power("x"), Some(-2));
        assert_eq!((x() + 1.0).lowest_negative_power("x"), None);
        assert_eq!(x().exp().lowest_negative_power("x"), None);
    }

    #[test]
    fn test_non_polynomial_terms_have_no_power() {
        let e = x().exp() + x();
        assert!(e.coefficient("x", 0).is_zero_num());
        assert!(e.coefficient("x", 1).is_one_num());
    }

    #[test]
    fn test_identically_zero() {
        let e = (x() + 1.0).pow_of(2.0) - x().pow_of(2.0) - 2.0 * x() - 1.0;
        assert!(e.is_identically_zero());
        assert!(!x().is_identically_zero());
    }
}
