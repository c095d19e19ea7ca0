// Differentiation engine - applies calculus rules
//
// Results are built through the canonical constructors, so constant factors
// fold and vanishing terms drop out as the derivative is assembled. The
// polynomial strategy relies on this to read degrees off repeated derivatives.

use crate::core::symbol::get_or_intern;
use crate::functions::registry::Registry;
use crate::{Expr, ExprKind};

impl Expr {
    /// Differentiate this expression with respect to a variable
    ///
    /// # Example
    /// ```
    /// use symb_solve::symb;
    /// let x = symb("x");
    /// let f = x.clone().pow_of(3.0) + 2.0 * &x;
    /// assert_eq!(f.diff("x"), 3.0 * x.pow_of(2.0) + 2.0);
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        if !self.contains_var(var) {
            return Expr::number(0.0);
        }
        match &self.kind {
            ExprKind::Number(_) => Expr::number(0.0),

            ExprKind::Symbol(name) => {
                if name == var {
                    Expr::number(1.0)
                } else {
                    Expr::number(0.0)
                }
            }

            // Sum rule: (u + v + ...)' = u' + v' + ...
            ExprKind::Sum(terms) => Expr::sum(terms.iter().map(|t| t.diff(var)).collect()),

            // Product rule, n-ary: sum over i of (u_i' * prod_{j != i} u_j)
            ExprKind::Product(factors) => {
                let mut terms = Vec::with_capacity(factors.len());
                for (i, factor) in factors.iter().enumerate() {
                    let prime = factor.diff(var);
                    if prime.is_zero_num() {
                        continue;
                    }
                    let mut parts: Vec<Expr> = Vec::with_capacity(factors.len());
                    parts.push(prime);
                    parts.extend(
                        factors
                            .iter()
                            .enumerate()
                            .filter(|(j, _)| *j != i)
                            .map(|(_, f)| (**f).clone()),
                    );
                    terms.push(Expr::product(parts));
                }
                Expr::sum(terms)
            }

            ExprKind::Pow(base, exp) => {
                let base_prime = base.diff(var);
                if !exp.contains_var(var) {
                    // Power rule: (u^n)' = n * u^(n-1) * u'
                    if base_prime.is_zero_num() {
                        return Expr::number(0.0);
                    }
                    let reduced = Expr::sum(vec![(**exp).clone(), Expr::number(-1.0)]);
                    return Expr::product(vec![
                        (**exp).clone(),
                        Expr::pow((**base).clone(), reduced),
                        base_prime,
                    ]);
                }
                // General rule: (u^v)' = u^v * (v' * ln(u) + v * u' / u)
                let exp_prime = exp.diff(var);
                let log_term = Expr::product(vec![exp_prime, Expr::func("ln", (**base).clone())]);
                let ratio_term = Expr::product(vec![
                    (**exp).clone(),
                    base_prime,
                    (**base).clone().recip(),
                ]);
                Expr::product(vec![self.clone(), Expr::sum(vec![log_term, ratio_term])])
            }

            ExprKind::FunctionCall { name, args } => {
                if let Some(def) = Registry::get(name.name())
                    && def.validate_arity(args.len())
                {
                    let arg_primes: Vec<Expr> = args.iter().map(|a| a.diff(var)).collect();
                    return (def.derivative)(args, &arg_primes);
                }

                // Unknown function: chain rule through an unevaluated derivative node
                // d/dx f(u) = ∂f/∂x * u'
                let symbol = get_or_intern(var);
                let terms = args
                    .iter()
                    .map(|arg| {
                        let arg_prime = arg.diff(var);
                        if arg_prime.is_zero_num() {
                            return Expr::number(0.0);
                        }
                        Expr::product(vec![
                            Expr::derivative_node(self.clone(), symbol.clone(), 1),
                            arg_prime,
                        ])
                    })
                    .collect();
                Expr::sum(terms)
            }

            ExprKind::Derivative {
                inner,
                var: axis,
                order,
            } => {
                if axis == var {
                    Expr::derivative_node((**inner).clone(), axis.clone(), order + 1)
                } else {
                    Expr::derivative_node(self.clone(), get_or_intern(var), 1)
                }
            }
        }
    }

    /// Differentiate `n` times with respect to `var`
    pub fn diff_n(&self, var: &str, n: u32) -> Expr {
        (0..n).fold(self.clone(), |acc, _| acc.diff(var))
    }
}
