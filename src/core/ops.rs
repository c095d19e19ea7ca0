//! Operator overloading and math-method sugar for [`Expr`]
//!
//! `x.clone() * x + 3.0 * x - 2.0` builds the same canonical tree as the
//! explicit `Expr::sum` / `Expr::product` calls.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::expr::Expr;

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::number(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::number(f64::from(n))
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

macro_rules! impl_binary_ops {
    ($lhs:ty, $rhs:ty) => {
        impl Add<$rhs> for $lhs {
            type Output = Expr;
            fn add(self, rhs: $rhs) -> Expr {
                Expr::sum(vec![Expr::from(self), Expr::from(rhs)])
            }
        }
        impl Sub<$rhs> for $lhs {
            type Output = Expr;
            fn sub(self, rhs: $rhs) -> Expr {
                Expr::sum(vec![Expr::from(self), Expr::from(rhs).negate()])
            }
        }
        impl Mul<$rhs> for $lhs {
            type Output = Expr;
            fn mul(self, rhs: $rhs) -> Expr {
                Expr::product(vec![Expr::from(self), Expr::from(rhs)])
            }
        }
        impl Div<$rhs> for $lhs {
            type Output = Expr;
            fn div(self, rhs: $rhs) -> Expr {
                Expr::product(vec![Expr::from(self), Expr::from(rhs).recip()])
            }
        }
    };
}

impl_binary_ops!(Expr, Expr);
impl_binary_ops!(Expr, &Expr);
impl_binary_ops!(&Expr, Expr);
impl_binary_ops!(&Expr, &Expr);
impl_binary_ops!(Expr, f64);
impl_binary_ops!(&Expr, f64);
impl_binary_ops!(f64, Expr);
impl_binary_ops!(f64, &Expr);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        self.negate()
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        self.clone().negate()
    }
}

macro_rules! impl_math_functions {
    ($($fn_name:ident => $func_str:literal),* $(,)?) => {
        impl Expr {
            $(
                #[doc = concat!("`", $func_str, "(self)`")]
                pub fn $fn_name(self) -> Expr {
                    Expr::func($func_str, self)
                }
            )*
        }
    };
}

impl_math_functions!(
    exp => "exp", ln => "ln",
    sin => "sin", cos => "cos", tan => "tan",
    sinh => "sinh", cosh => "cosh",
    sqrt => "sqrt",
);

impl Expr {
    /// `self ^ exp`
    pub fn pow_of(self, exp: impl Into<Expr>) -> Expr {
        Expr::pow(self, exp.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_build_canonical_trees() {
        let x = Expr::symbol("x");
        let a = x.clone() * x.clone() + 3.0 * &x - 2.0;
        let b = Expr::sum(vec![
            Expr::number(-2.0),
            Expr::product(vec![Expr::number(3.0), x.clone()]),
            Expr::pow(x, Expr::number(2.0)),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_division_and_negation() {
        let x = Expr::symbol("x");
        assert!((&x / &x).is_one_num());
        assert!((x.clone() - x.clone()).is_zero_num());
        assert_eq!(-(-x.clone()), x);
    }

    #[test]
    fn test_math_methods() {
        let x = Expr::symbol("x");
        assert_eq!(x.clone().exp().ln(), x);
        assert_eq!(x.clone().sqrt(), x.pow_of(0.5));
    }
}
