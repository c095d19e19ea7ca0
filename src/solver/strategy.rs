use std::sync::LazyLock;

use super::Solver;
use super::exponential::ExponentialStrategy;
use super::inverse::InverseStrategy;
use super::numeric::NumericFallbackStrategy;
use super::polynomial::PolynomialStrategy;
use crate::core::known_symbols as ks;
use crate::core::symbol::InternedSymbol;
use crate::{Equation, Expr, Roots, SolveError};

/// A way of solving `expr = 0` for one unknown.
pub(crate) trait SolveStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Attempts to solve `expr = 0` for `unknown`.
    /// Returns:
    /// - None: the strategy does not apply to this equation.
    /// - Some(Ok(roots)): the strategy applied; `roots` may be empty.
    /// - Some(Err(e)): the strategy applied but failed.
    fn apply(
        &self,
        expr: &Expr,
        unknown: &Unknown,
        solver: &Solver,
    ) -> Option<Result<Roots, SolveError>>;

    /// Whether this is the numeric fallback, which configuration can switch off.
    fn is_numeric(&self) -> bool {
        false
    }
}

/// Strategies in the order they are tried
pub(crate) static STRATEGIES: LazyLock<Vec<Box<dyn SolveStrategy>>> = LazyLock::new(|| {
    vec![
        Box::new(PolynomialStrategy),
        Box::new(ExponentialStrategy::new()),
        Box::new(InverseStrategy),
        Box::new(NumericFallbackStrategy),
    ]
});

/// A validated unknown: a plain symbol that is not a named constant
#[derive(Debug, Clone)]
pub(crate) struct Unknown {
    expr: Expr,
    symbol: InternedSymbol,
}

impl Unknown {
    pub(crate) fn new(expr: &Expr) -> Result<Self, SolveError> {
        match expr.as_symbol() {
            Some(s) if !(s == ks::E || s == ks::I || s == ks::PI) => Ok(Unknown {
                expr: expr.clone(),
                symbol: s.clone(),
            }),
            _ => Err(SolveError::InvalidUnknown {
                unknown: expr.to_string(),
            }),
        }
    }

    pub(crate) fn name(&self) -> &str {
        self.symbol.name()
    }

    pub(crate) fn expr(&self) -> &Expr {
        &self.expr
    }

    pub(crate) fn symbol(&self) -> &InternedSymbol {
        &self.symbol
    }

    /// `unknown = value`
    pub(crate) fn bind(&self, value: Expr) -> Equation {
        Equation::new(self.expr.clone(), value)
    }
}
