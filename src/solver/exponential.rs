//! Equations with a single exponential term
//!
//! Tried most specific first:
//! 1. `b*exp(a*x) + c`
//! 2. `exp(a*x) + c`
//! 3. `b*exp(a*x^2) + c`
//! 4. `exp(a*x^2) + c`

use tracing::trace;

use super::Solver;
use super::polynomial::solve_polynomial;
use super::strategy::{SolveStrategy, Unknown};
use crate::pattern::{Placeholder, Template, match_template};
use crate::{Expr, Roots, SolveError};

#[derive(Debug, Clone, Copy)]
enum Exponent {
    /// `a*x`
    Linear,
    /// `a*x^2`
    Square,
}

struct ExpTemplate {
    template: Template,
    exponent: Exponent,
}

pub(crate) struct ExponentialStrategy {
    templates: Vec<ExpTemplate>,
}

impl ExponentialStrategy {
    pub(crate) fn new() -> Self {
        let templates = [
            (true, Exponent::Linear),
            (false, Exponent::Linear),
            (true, Exponent::Square),
            (false, Exponent::Square),
        ]
        .into_iter()
        .map(|(scaled, exponent)| ExpTemplate {
            template: build_template(scaled, exponent),
            exponent,
        })
        .collect();
        Self { templates }
    }
}

/// `[b*]exp(a*x[^2]) + c` with `a` optional
fn build_template(scaled: bool, exponent: Exponent) -> Template {
    let power = match exponent {
        Exponent::Linear => Template::Unknown,
        Exponent::Square => Template::Pow(
            Box::new(Template::Unknown),
            Box::new(Template::Literal(Expr::number(2.0))),
        ),
    };
    let exp = Template::Func(
        "exp",
        Box::new(Template::Product(vec![Template::Coeff(Placeholder::A), power])),
    );
    let term = if scaled {
        Template::Product(vec![Template::Hole(Placeholder::B), exp])
    } else {
        exp
    };
    Template::Sum(vec![term, Template::Hole(Placeholder::C)])
}

impl SolveStrategy for ExponentialStrategy {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn apply(
        &self,
        expr: &Expr,
        unknown: &Unknown,
        _solver: &Solver,
    ) -> Option<Result<Roots, SolveError>> {
        for entry in &self.templates {
            let Some(binding) = match_template(expr, &entry.template, unknown.name()) else {
                continue;
            };
            let (Some(a), Some(c)) = (binding.get(Placeholder::A), binding.get(Placeholder::C))
            else {
                continue;
            };
            let b = binding
                .get(Placeholder::B)
                .cloned()
                .unwrap_or_else(|| Expr::number(1.0));
            // exp(...) = -c/b
            let log_value = (-c / b).ln();

            match entry.exponent {
                Exponent::Linear => {
                    let mut roots = Roots::new();
                    roots.push(unknown.bind(log_value / a));
                    return Some(Ok(roots));
                }
                Exponent::Square => {
                    let quadratic = a * unknown.expr().clone().pow_of(2.0) - log_value;
                    if let Some(roots) = solve_polynomial(&quadratic, unknown) {
                        return Some(Ok(roots));
                    }
                    trace!(%quadratic, "delegated polynomial solve declined");
                }
            }
        }
        None
    }
}
