//! Equations and typed equation lists
//!
//! One list structure serves three roles, told apart by a zero-sized marker:
//! a [`System`] is a conjunction of equations, [`Roots`] are alternative
//! `x = r` solutions for one unknown, and a [`Branch`] binds each solved
//! unknown once.

use std::fmt;
use std::marker::PhantomData;

use crate::Expr;

/// `lhs = rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    lhs: Expr,
    rhs: Expr,
}

impl Equation {
    pub fn new(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Equation {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// `lhs - rhs`, zero exactly when the equation holds
    pub fn residual(&self) -> Expr {
        Expr::sum(vec![self.lhs.clone(), self.rhs.clone().negate()])
    }

    /// Replace `var` by `value` on both sides
    pub fn substitute(&self, var: &str, value: &Expr) -> Equation {
        Equation {
            lhs: self.lhs.substitute(var, value),
            rhs: self.rhs.substitute(var, value),
        }
    }
}

/// A bare expression stands for `expr = 0`
impl From<Expr> for Equation {
    fn from(expr: Expr) -> Self {
        Equation::new(expr, Expr::number(0.0))
    }
}

impl From<&Equation> for Equation {
    fn from(eq: &Equation) -> Self {
        eq.clone()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// Marker: all equations hold together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conjunction;

/// Marker: exactly one of the equations holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternatives;

/// Marker: one `unknown = value` binding per unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment;

/// Ordered list of equations whose meaning is fixed by `K`
#[derive(Debug, Clone, PartialEq)]
pub struct EquationList<K> {
    equations: Vec<Equation>,
    kind: PhantomData<K>,
}

pub type System = EquationList<Conjunction>;
pub type Roots = EquationList<Alternatives>;
pub type Branch = EquationList<Assignment>;

/// Alternative complete solutions of a system
pub type SolutionBranchList = Vec<Branch>;

impl<K> Default for EquationList<K> {
    fn default() -> Self {
        EquationList {
            equations: Vec::new(),
            kind: PhantomData,
        }
    }
}

impl<K> EquationList<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, equation: impl Into<Equation>) {
        self.equations.push(equation.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Equation> {
        self.equations.iter()
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn as_slice(&self) -> &[Equation] {
        &self.equations
    }
}

impl<K> From<Vec<Equation>> for EquationList<K> {
    fn from(equations: Vec<Equation>) -> Self {
        EquationList {
            equations,
            kind: PhantomData,
        }
    }
}

impl<K, E: Into<Equation>> FromIterator<E> for EquationList<K> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        EquationList::from(iter.into_iter().map(Into::into).collect::<Vec<_>>())
    }
}

impl<K> IntoIterator for EquationList<K> {
    type Item = Equation;
    type IntoIter = std::vec::IntoIter<Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.equations.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a EquationList<K> {
    type Item = &'a Equation;
    type IntoIter = std::slice::Iter<'a, Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.equations.iter()
    }
}

impl<K> fmt::Display for EquationList<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, eq) in self.equations.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{eq}")?;
        }
        write!(f, "}}")
    }
}

impl Roots {
    /// The right-hand sides, i.e. the root values
    pub fn values(&self) -> impl Iterator<Item = &Expr> {
        self.equations.iter().map(Equation::rhs)
    }
}

impl Branch {
    /// Value bound to `unknown` in this branch
    pub fn value_of(&self, unknown: &str) -> Option<&Expr> {
        self.equations
            .iter()
            .find(|eq| eq.lhs().is_symbol(unknown))
            .map(Equation::rhs)
    }

    /// A new branch with `binding` placed first
    pub(crate) fn prepended(&self, binding: Equation) -> Branch {
        let mut equations = Vec::with_capacity(self.equations.len() + 1);
        equations.push(binding);
        equations.extend(self.equations.iter().cloned());
        Branch::from(equations)
    }

    /// The same bindings with the last one moved to the front
    pub(crate) fn rotated_right(mut self) -> Branch {
        self.equations.rotate_right(1);
        self
    }

    /// Substitute every binding of this branch into `expr`, in order
    pub(crate) fn back_substitute(&self, expr: &Expr) -> Expr {
        self.equations.iter().fold(expr.clone(), |acc, eq| match eq.lhs().as_symbol() {
            Some(var) if !eq.rhs().is_symbol(var.name()) => acc.substitute(var.name(), eq.rhs()),
            _ => acc,
        })
    }
}
