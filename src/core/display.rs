//! Display implementation for expressions.
//!
//! Human-readable notation such as `x^2 + 2*x - 1`, `exp(x)/(x + 1)` or
//! `sqrt(3)*i`.
//!
//! # Display Behavior Notes for N-ary AST
//! - Sum displays the constant term last and negative terms with ` - `
//! - Product displays factors with negative exponents as a denominator
//! - `u^0.5` displays as `sqrt(u)`
//! - Integer-valued numbers print without a decimal point
//! - Derivatives use ∂ notation

use std::fmt;
use std::sync::Arc;

use super::expr::{Expr, ExprKind};
use super::traits::is_one;

fn format_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    #[allow(clippy::float_cmp)]
    let is_int = n.trunc() == n;
    if is_int && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        return write!(f, "{}", n as i64);
    }
    write!(f, "{n}")
}

/// If `expr` carries a negative sign, return its positive counterpart
fn extract_negative(expr: &Expr) -> Option<Expr> {
    match &expr.kind {
        ExprKind::Number(n) if *n < 0.0 => Some(Expr::number(-n)),
        ExprKind::Product(factors) => match factors.first().and_then(|c| c.as_number()) {
            Some(c) if c < 0.0 => {
                let mut rest: Vec<Arc<Expr>> = factors[1..].to_vec();
                if !is_one(-c) {
                    rest.insert(0, Arc::new(Expr::number(-c)));
                }
                Some(if rest.len() == 1 {
                    Expr::unwrap_arc(rest.remove(0))
                } else {
                    Expr::new(ExprKind::Product(rest))
                })
            }
            _ => None,
        },
        _ => None,
    }
}

/// Negative numeric exponent, if any: `x^-2 -> Some(x^2)`
fn as_denominator(expr: &Expr) -> Option<Expr> {
    if let ExprKind::Pow(base, exp) = &expr.kind
        && let Some(e) = exp.as_number()
        && e < 0.0
    {
        return Some(if is_one(-e) {
            (**base).clone()
        } else {
            Expr::new(ExprKind::Pow(Arc::clone(base), Arc::new(Expr::number(-e))))
        });
    }
    None
}

fn write_wrapped(f: &mut fmt::Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn needs_parens_as_factor(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Sum(_))
}

fn needs_parens_as_base(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Sum(_) | ExprKind::Product(_) | ExprKind::Pow(_, _) => true,
        ExprKind::Number(n) => *n < 0.0 || n.trunc() != *n,
        _ => false,
    }
}

fn needs_parens_as_exponent(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Number(n) => *n < 0.0,
        ExprKind::Symbol(_) | ExprKind::FunctionCall { .. } => false,
        _ => true,
    }
}

fn format_sum(f: &mut fmt::Formatter<'_>, terms: &[Arc<Expr>]) -> fmt::Result {
    // Constant term goes last: x^2 - 1 rather than -1 + x^2
    let (constants, rest): (Vec<&Arc<Expr>>, Vec<&Arc<Expr>>) =
        terms.iter().partition(|t| t.as_number().is_some());

    for (i, term) in rest.into_iter().chain(constants).enumerate() {
        match extract_negative(term) {
            Some(positive) => {
                write!(f, "{}", if i == 0 { "-" } else { " - " })?;
                write_wrapped(f, &positive, needs_parens_as_factor(&positive))?;
            }
            None => {
                if i > 0 {
                    write!(f, " + ")?;
                }
                write_wrapped(f, term, needs_parens_as_factor(term))?;
            }
        }
    }
    Ok(())
}

fn write_factor_list(f: &mut fmt::Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    for (i, fac) in factors.iter().enumerate() {
        if i > 0 {
            write!(f, "*")?;
        }
        write_wrapped(f, fac, needs_parens_as_factor(fac))?;
    }
    Ok(())
}

fn format_product(f: &mut fmt::Formatter<'_>, factors: &[Arc<Expr>]) -> fmt::Result {
    let mut coeff = 1.0;
    let mut numerator: Vec<Expr> = Vec::new();
    let mut denominator: Vec<Expr> = Vec::new();

    for fac in factors {
        if let Some(n) = fac.as_number() {
            coeff *= n;
        } else if let Some(den) = as_denominator(fac) {
            denominator.push(den);
        } else {
            numerator.push((**fac).clone());
        }
    }

    if coeff < 0.0 {
        write!(f, "-")?;
        coeff = -coeff;
    }
    if !is_one(coeff) || numerator.is_empty() {
        numerator.insert(0, Expr::number(coeff));
    }
    write_factor_list(f, &numerator)?;

    if !denominator.is_empty() {
        write!(f, "/")?;
        if let [single] = denominator.as_slice() {
            write_wrapped(f, single, needs_parens_as_factor(single))?;
        } else {
            write!(f, "(")?;
            write_factor_list(f, &denominator)?;
            write!(f, ")")?;
        }
    }
    Ok(())
}

fn format_pow(f: &mut fmt::Formatter<'_>, base: &Expr, exp: &Expr) -> fmt::Result {
    if let Some(e) = exp.as_number() {
        #[allow(clippy::float_cmp)]
        if e == 0.5 {
            return write!(f, "sqrt({base})");
        }
        if e < 0.0 {
            let positive = Expr::pow(base.clone(), Expr::number(-e));
            write!(f, "1/")?;
            let parens = matches!(positive.kind, ExprKind::Sum(_) | ExprKind::Product(_));
            return write_wrapped(f, &positive, parens);
        }
    }
    write_wrapped(f, base, needs_parens_as_base(base))?;
    write!(f, "^")?;
    write_wrapped(f, exp, needs_parens_as_exponent(exp))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(n) => format_number(f, *n),
            ExprKind::Symbol(s) => write!(f, "{s}"),
            ExprKind::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            ExprKind::Sum(terms) => format_sum(f, terms),
            ExprKind::Product(factors) => format_product(f, factors),
            ExprKind::Pow(base, exp) => format_pow(f, base, exp),
            ExprKind::Derivative { inner, var, order } => {
                write!(f, "\u{2202}^{order}_{inner}/\u{2202}_{var}^{order}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_numbers() {
        assert_eq!(Expr::number(3.0).to_string(), "3");
        assert_eq!(Expr::number(-2.0).to_string(), "-2");
        assert_eq!(Expr::number(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_polynomial_display() {
        let p = x().pow_of(2.0) - 3.0 * x() + 2.0;
        assert_eq!(p.to_string(), "x^2 - 3*x + 2");
    }

    #[test]
    fn test_fraction_and_sqrt() {
        let frac = Expr::number(1.0) / x();
        assert_eq!(frac.to_string(), "1/x");
        let q = x() / (x() + 1.0);
        assert_eq!(q.to_string(), "x/(x + 1)");
        assert_eq!(Expr::number(3.0).sqrt().to_string(), "sqrt(3)");
    }

    #[test]
    fn test_denominators_are_wrapped_once() {
        let y = Expr::symbol("y");
        assert_eq!((y.clone() / (x() + 1.0)).to_string(), "y/(x + 1)");
        assert_eq!((y.clone() / (x() * Expr::symbol("z"))).to_string(), "y/(x*z)");
        let mixed = y / ((x() + 1.0) * Expr::symbol("z"));
        assert_eq!(mixed.to_string(), "y/(z*(x + 1))");
    }

    #[test]
    fn test_negated_term() {
        assert_eq!((-x()).to_string(), "-x");
        assert_eq!(Expr::func("ln", Expr::number(3.0)).to_string(), "ln(3)");
    }
}
