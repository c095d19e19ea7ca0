//! Structural template matching
//!
//! A [`Template`] describes the shape of an expression in terms of the unknown
//! and up to three placeholders. Sums and products match commutatively: each
//! structured sub-template claims one operand, and a single placeholder in
//! the same list absorbs whatever operands are left over.
//!
//! ```
//! use symb_solve::pattern::{Placeholder, Template, match_template};
//! use symb_solve::symb;
//!
//! // b*x + c
//! let template = Template::Sum(vec![
//!     Template::Product(vec![Template::Hole(Placeholder::B), Template::Unknown]),
//!     Template::Hole(Placeholder::C),
//! ]);
//! let x = symb("x");
//! let binding = match_template(&(3.0 * x - 1.0), &template, "x").unwrap();
//! assert_eq!(binding.get(Placeholder::B).unwrap().as_number(), Some(3.0));
//! assert_eq!(binding.get(Placeholder::C).unwrap().as_number(), Some(-1.0));
//! ```

use crate::{Expr, ExprKind};

/// The fixed placeholder set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    A,
    B,
    C,
}

impl Placeholder {
    fn slot(self) -> usize {
        match self {
            Placeholder::A => 0,
            Placeholder::B => 1,
            Placeholder::C => 2,
        }
    }
}

/// Expressions bound to placeholders by a successful match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchBinding {
    slots: [Option<Expr>; 3],
}

impl MatchBinding {
    /// Expression bound to `placeholder`, if any
    pub fn get(&self, placeholder: Placeholder) -> Option<&Expr> {
        self.slots[placeholder.slot()].as_ref()
    }

    /// Extend with `placeholder = value`; fails on a conflicting earlier binding
    fn bind(&self, placeholder: Placeholder, value: Expr) -> Option<MatchBinding> {
        match self.get(placeholder) {
            Some(existing) if *existing != value => None,
            Some(_) => Some(self.clone()),
            None => {
                let mut next = self.clone();
                next.slots[placeholder.slot()] = Some(value);
                Some(next)
            }
        }
    }
}

/// Expression shape to match against
#[derive(Debug, Clone)]
pub enum Template {
    /// Any non-empty expression free of the unknown
    Hole(Placeholder),
    /// Like `Hole`, but may be absent from a product (binds `1`) or sum (binds `0`)
    Coeff(Placeholder),
    /// The unknown itself
    Unknown,
    /// Exactly this expression
    Literal(Expr),
    Sum(Vec<Template>),
    Product(Vec<Template>),
    Pow(Box<Template>, Box<Template>),
    /// Single-argument call of the named function
    Func(&'static str, Box<Template>),
}

impl Template {
    fn is_placeholder(&self) -> bool {
        matches!(self, Template::Hole(_) | Template::Coeff(_))
    }
}

/// Match `expr` against `template`, treating `unknown` as the unknown
pub fn match_template(expr: &Expr, template: &Template, unknown: &str) -> Option<MatchBinding> {
    match_node(expr, template, unknown, &MatchBinding::default())
}

fn match_node(
    expr: &Expr,
    template: &Template,
    unknown: &str,
    binding: &MatchBinding,
) -> Option<MatchBinding> {
    match template {
        Template::Hole(p) | Template::Coeff(p) => {
            if expr.contains_var(unknown) {
                None
            } else {
                binding.bind(*p, expr.clone())
            }
        }
        Template::Unknown => expr.is_symbol(unknown).then(|| binding.clone()),
        Template::Literal(lit) => (expr == lit).then(|| binding.clone()),
        Template::Sum(parts) => {
            let operands = operands_of(expr, ListKind::Sum);
            match_list(&operands, parts, ListKind::Sum, unknown, binding)
        }
        Template::Product(parts) => {
            let operands = operands_of(expr, ListKind::Product);
            match_list(&operands, parts, ListKind::Product, unknown, binding)
        }
        Template::Pow(base, exp) => match &expr.kind {
            ExprKind::Pow(b, e) => {
                let after_base = match_node(b, base, unknown, binding)?;
                match_node(e, exp, unknown, &after_base)
            }
            _ => None,
        },
        Template::Func(name, arg) => {
            let inner = expr.function_arg(name)?;
            match_node(inner, arg, unknown, binding)
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Sum,
    Product,
}

impl ListKind {
    fn combine(self, parts: Vec<Expr>) -> Expr {
        match self {
            ListKind::Sum => Expr::sum(parts),
            ListKind::Product => Expr::product(parts),
        }
    }
}

/// Operands of a sum or product; any other expression is a one-operand list
fn operands_of(expr: &Expr, kind: ListKind) -> Vec<Expr> {
    match (&expr.kind, kind) {
        (ExprKind::Sum(items), ListKind::Sum) | (ExprKind::Product(items), ListKind::Product) => {
            items.iter().map(|i| (**i).clone()).collect()
        }
        _ => vec![expr.clone()],
    }
}

fn match_list(
    operands: &[Expr],
    parts: &[Template],
    kind: ListKind,
    unknown: &str,
    binding: &MatchBinding,
) -> Option<MatchBinding> {
    let (placeholders, structured): (Vec<&Template>, Vec<&Template>) =
        parts.iter().partition(|t| t.is_placeholder());
    // A second placeholder would make the leftover split ambiguous
    if placeholders.len() > 1 || structured.len() > operands.len() {
        return None;
    }
    let mut used = vec![false; operands.len()];
    assign(
        operands,
        &mut used,
        &structured,
        placeholders.first().copied(),
        kind,
        unknown,
        binding,
    )
}

/// Depth-first assignment of structured templates to distinct operands
fn assign(
    operands: &[Expr],
    used: &mut [bool],
    structured: &[&Template],
    placeholder: Option<&Template>,
    kind: ListKind,
    unknown: &str,
    binding: &MatchBinding,
) -> Option<MatchBinding> {
    let Some((first, rest)) = structured.split_first() else {
        return absorb_leftovers(operands, used, placeholder, kind, unknown, binding);
    };
    for i in 0..operands.len() {
        if used[i] {
            continue;
        }
        if let Some(next) = match_node(&operands[i], first, unknown, binding) {
            used[i] = true;
            if let Some(done) = assign(operands, used, rest, placeholder, kind, unknown, &next) {
                return Some(done);
            }
            used[i] = false;
        }
    }
    None
}

fn absorb_leftovers(
    operands: &[Expr],
    used: &[bool],
    placeholder: Option<&Template>,
    kind: ListKind,
    unknown: &str,
    binding: &MatchBinding,
) -> Option<MatchBinding> {
    let leftovers: Vec<Expr> = operands
        .iter()
        .zip(used)
        .filter(|(_, u)| !**u)
        .map(|(o, _)| o.clone())
        .collect();

    match placeholder {
        None => leftovers.is_empty().then(|| binding.clone()),
        Some(Template::Hole(_)) if leftovers.is_empty() => None,
        Some(Template::Hole(p) | Template::Coeff(p)) => {
            let value = kind.combine(leftovers);
            if value.contains_var(unknown) {
                return None;
            }
            binding.bind(*p, value)
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn scaled_exp() -> Template {
        // b*exp(a*x) + c
        Template::Sum(vec![
            Template::Product(vec![
                Template::Hole(Placeholder::B),
                Template::Func(
                    "exp",
                    Box::new(Template::Product(vec![
                        Template::Coeff(Placeholder::A),
                        Template::Unknown,
                    ])),
                ),
            ]),
            Template::Hole(Placeholder::C),
        ])
    }

    #[test]
    fn test_optional_coefficient_binds_one() {
        let t = Template::Product(vec![Template::Coeff(Placeholder::A), Template::Unknown]);
        let m = match_template(&x(), &t, "x").expect("x matches a*x");
        assert!(m.get(Placeholder::A).is_some_and(Expr::is_one_num));

        let m = match_template(&(3.0 * x()), &t, "x").expect("3x matches a*x");
        assert_eq!(m.get(Placeholder::A), Some(&Expr::number(3.0)));
    }

    #[test]
    fn test_exponential_template() {
        let e = 2.0 * (5.0 * x()).exp() - 6.0;
        let m = match_template(&e, &scaled_exp(), "x").expect("matches");
        assert_eq!(m.get(Placeholder::A), Some(&Expr::number(5.0)));
        assert_eq!(m.get(Placeholder::B), Some(&Expr::number(2.0)));
        assert_eq!(m.get(Placeholder::C), Some(&Expr::number(-6.0)));
    }

    #[test]
    fn test_symbolic_holes() {
        let k = Expr::symbol("k");
        let y = Expr::symbol("y");
        let e = k.clone() * x().exp() + y.clone() + 1.0;
        let m = match_template(&e, &scaled_exp(), "x").expect("matches");
        assert_eq!(m.get(Placeholder::B), Some(&k));
        assert_eq!(m.get(Placeholder::C), Some(&(y + 1.0)));
    }

    #[test]
    fn test_hole_requires_an_operand() {
        // exp(x) - 6 has no b factor
        let e = x().exp() - 6.0;
        assert!(match_template(&e, &scaled_exp(), "x").is_none());
        // b*exp(x) alone has no c term
        assert!(match_template(&(2.0 * x().exp()), &scaled_exp(), "x").is_none());
    }

    #[test]
    fn test_hole_must_be_free_of_unknown() {
        let e = 2.0 * x().exp() + x();
        assert!(match_template(&e, &scaled_exp(), "x").is_none());
    }

    #[test]
    fn test_pow_and_literal() {
        let t = Template::Pow(
            Box::new(Template::Unknown),
            Box::new(Template::Literal(Expr::number(2.0))),
        );
        assert!(match_template(&x().pow_of(2.0), &t, "x").is_some());
        assert!(match_template(&x().pow_of(3.0), &t, "x").is_none());
        assert!(match_template(&x(), &t, "x").is_none());
    }

    #[test]
    fn test_conflicting_binding_fails() {
        let t = Template::Sum(vec![
            Template::Product(vec![Template::Hole(Placeholder::A), Template::Unknown]),
            Template::Func("exp", Box::new(Template::Hole(Placeholder::A))),
        ]);
        let y = Expr::symbol("y");
        let ok = y.clone() * x() + y.clone().exp();
        assert!(match_template(&ok, &t, "x").is_some());
        let bad = y.clone() * x() + (2.0 * y).exp();
        assert!(match_template(&bad, &t, "x").is_none());
    }
}
