//! Canonical ordering for expressions.
//!
//! Sums and products are sorted with [`expr_cmp`] when they are built, so two
//! expressions with the same terms in a different order end up identical.

use std::cmp::Ordering as CmpOrdering;

use super::expr::{Expr, ExprKind};

/// Compare expressions for canonical ordering.
///
/// Powers sort next to their base (`x < x^2 < y`). Everything else sorts by
/// kind: Number < Symbol < Product < Sum < `FunctionCall` < Derivative.
/// The order is total and agrees with structural equality.
pub fn expr_cmp(a: &Expr, b: &Expr) -> CmpOrdering {
    use ExprKind::{Number, Pow};

    // Numbers always come first
    if let (Number(x), Number(y)) = (&a.kind, &b.kind) {
        return x.total_cmp(y);
    }

    let a_pow = matches!(a.kind, Pow(_, _));
    let b_pow = matches!(b.kind, Pow(_, _));
    if !a_pow && !b_pow {
        return expr_cmp_type_strict(a, b);
    }

    // At least one side is a power: compare (base, exponent) keys.
    // A bare term counts as itself to the power one.
    let (base_a, exp_a) = a.split_power();
    let (base_b, exp_b) = b.split_power();
    expr_cmp(&base_a, &base_b).then_with(|| expr_cmp(&exp_a, &exp_b))
}

fn cmp_lists(a: &[std::sync::Arc<Expr>], b: &[std::sync::Arc<Expr>]) -> CmpOrdering {
    for (x, y) in a.iter().zip(b.iter()) {
        match expr_cmp(x, y) {
            CmpOrdering::Equal => {}
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Strict kind ordering for non-power terms
fn expr_cmp_type_strict(a: &Expr, b: &Expr) -> CmpOrdering {
    use ExprKind::{Derivative, FunctionCall, Number, Pow, Product, Sum, Symbol};
    match (&a.kind, &b.kind) {
        (Number(x), Number(y)) => x.total_cmp(y),
        (Number(_), _) => CmpOrdering::Less,
        (_, Number(_)) => CmpOrdering::Greater,

        (Symbol(x), Symbol(y)) => x.cmp(y),
        (Symbol(_), _) => CmpOrdering::Less,
        (_, Symbol(_)) => CmpOrdering::Greater,

        (Product(f1), Product(f2)) => cmp_lists(f1, f2),
        (Product(_), _) => CmpOrdering::Less,
        (_, Product(_)) => CmpOrdering::Greater,

        (Sum(t1), Sum(t2)) => cmp_lists(t1, t2),
        (Sum(_), _) => CmpOrdering::Less,
        (_, Sum(_)) => CmpOrdering::Greater,

        (FunctionCall { name: n1, args: a1 }, FunctionCall { name: n2, args: a2 }) => {
            n1.cmp(n2).then_with(|| cmp_lists(a1, a2))
        }
        (FunctionCall { .. }, _) => CmpOrdering::Less,
        (_, FunctionCall { .. }) => CmpOrdering::Greater,

        (
            Derivative {
                inner: i1,
                var: v1,
                order: o1,
            },
            Derivative {
                inner: i2,
                var: v2,
                order: o2,
            },
        ) => v1
            .cmp(v2)
            .then_with(|| o1.cmp(o2))
            .then_with(|| expr_cmp(i1, i2)),

        // Powers are routed through expr_cmp before reaching here
        (Pow(..), _) | (_, Pow(..)) => CmpOrdering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_first() {
        let n = Expr::number(5.0);
        let x = Expr::symbol("x");
        assert_eq!(expr_cmp(&n, &x), CmpOrdering::Less);
        assert_eq!(expr_cmp(&x, &n), CmpOrdering::Greater);
    }

    #[test]
    fn test_powers_sort_by_base() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let x2 = Expr::pow(x.clone(), Expr::number(2.0));
        assert_eq!(expr_cmp(&x, &x2), CmpOrdering::Less);
        assert_eq!(expr_cmp(&x2, &y), CmpOrdering::Less);
    }

    #[test]
    fn test_equal_iff_structurally_equal() {
        let a = Expr::func("sin", Expr::symbol("x"));
        let b = Expr::func("sin", Expr::symbol("x"));
        let c = Expr::func("cos", Expr::symbol("x"));
        assert_eq!(expr_cmp(&a, &b), CmpOrdering::Equal);
        assert_ne!(expr_cmp(&a, &c), CmpOrdering::Equal);
    }
}
