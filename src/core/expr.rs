//! Expression tree with canonicalizing constructors
//!
//! N-ary Sum/Product architecture. The smart constructors (`sum`, `product`,
//! `pow`, `func`) keep every expression they build in a normal form: flat,
//! sorted, numbers folded, like terms combined and equal bases merged. The
//! solver relies on this so that structural equality and "is this the number
//! zero" answer the questions it asks.

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use super::known_symbols as ks;
use super::ordering::expr_cmp;
use super::symbol::{InternedSymbol, get_or_intern};
use super::traits::{as_small_integer, clean_integer, is_neg_one, is_one, is_zero};

// =============================================================================
// EXPRESSION ID COUNTER
// =============================================================================

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

// =============================================================================
// EXPR - The main expression type
// =============================================================================

#[derive(Debug, Clone)]
pub struct Expr {
    /// Unique ID for debugging (not used in equality comparisons)
    pub id: u64,
    /// Structural hash for cheap inequality rejection
    pub hash: u64,
    /// The kind of expression (structure)
    pub kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

// Structural equality based on KIND only (with hash fast-reject)
impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash {
            return false;
        }
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Constant number (e.g., 3.14, 1e10)
    Number(f64),

    /// Variable or named constant (e.g., "x", "e", "i")
    Symbol(InternedSymbol),

    /// Function call (built-in or user-defined)
    FunctionCall {
        name: InternedSymbol,
        args: Vec<Arc<Expr>>,
    },

    /// N-ary sum, flat and sorted. Subtraction is `a + (-1)*b`.
    Sum(Vec<Arc<Expr>>),

    /// N-ary product, flat and sorted, numeric coefficient first.
    /// Division is `a * b^-1`.
    Product(Vec<Arc<Expr>>),

    /// Exponentiation
    Pow(Arc<Expr>, Arc<Expr>),

    /// Unevaluated derivative of an expression containing unknown functions
    Derivative {
        inner: Arc<Expr>,
        var: InternedSymbol,
        order: u32,
    },
}

/// FNV-1a structural hash over the whole tree
fn compute_expr_hash(kind: &ExprKind) -> u64 {
    const FNV_OFFSET: u64 = 14695981039346656037;
    const FNV_PRIME: u64 = 1099511628211;

    #[inline(always)]
    fn hash_u64(mut hash: u64, n: u64) -> u64 {
        for byte in n.to_le_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }

    #[inline(always)]
    fn hash_byte(hash: u64, b: u8) -> u64 {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    }

    let h = FNV_OFFSET;
    match kind {
        ExprKind::Number(n) => hash_u64(hash_byte(h, b'N'), n.to_bits()),
        ExprKind::Symbol(s) => hash_u64(hash_byte(h, b'S'), s.id()),
        ExprKind::FunctionCall { name, args } => {
            let h = hash_u64(hash_byte(h, b'F'), name.id());
            args.iter().fold(h, |acc, arg| hash_u64(acc, arg.hash))
        }
        ExprKind::Sum(terms) => {
            let h = hash_byte(h, b'+');
            terms.iter().fold(h, |acc, t| hash_u64(acc, t.hash))
        }
        ExprKind::Product(factors) => {
            let h = hash_byte(h, b'*');
            factors.iter().fold(h, |acc, f| hash_u64(acc, f.hash))
        }
        ExprKind::Pow(base, exp) => {
            let h = hash_u64(hash_byte(h, b'^'), base.hash);
            hash_u64(h, exp.hash)
        }
        ExprKind::Derivative { inner, var, order } => {
            let h = hash_u64(hash_byte(h, b'D'), var.id());
            let h = hash_u64(h, u64::from(*order));
            hash_u64(h, inner.hash)
        }
    }
}

impl Expr {
    /// Wrap a kind without any canonicalization
    pub fn new(kind: ExprKind) -> Self {
        let hash = compute_expr_hash(&kind);
        Expr {
            id: next_id(),
            hash,
            kind,
        }
    }

    /// Take an expression out of an `Arc`, cloning only when it is shared
    #[inline]
    pub fn unwrap_arc(arc: Arc<Expr>) -> Expr {
        Arc::try_unwrap(arc).unwrap_or_else(|a| (*a).clone())
    }

    // -------------------------------------------------------------------------
    // Accessor methods
    // -------------------------------------------------------------------------

    /// Check if expression is a constant number and return its value
    pub fn as_number(&self) -> Option<f64> {
        match &self.kind {
            ExprKind::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Return the symbol if this expression is a bare symbol
    pub fn as_symbol(&self) -> Option<&InternedSymbol> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this expression is the symbol `name`
    #[inline]
    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_symbol().is_some_and(|s| s == name)
    }

    /// Check if this expression is the number zero (with tolerance)
    #[inline]
    pub fn is_zero_num(&self) -> bool {
        self.as_number().is_some_and(is_zero)
    }

    /// Check if this expression is the number one (with tolerance)
    #[inline]
    pub fn is_one_num(&self) -> bool {
        self.as_number().is_some_and(is_one)
    }

    /// Check if this expression is the number negative one (with tolerance)
    #[inline]
    pub fn is_neg_one_num(&self) -> bool {
        self.as_number().is_some_and(is_neg_one)
    }

    // -------------------------------------------------------------------------
    // Basic constructors
    // -------------------------------------------------------------------------

    /// Create a number expression
    pub fn number(n: f64) -> Self {
        // -0.0 and 0.0 must hash alike
        let n = if n == 0.0 { 0.0 } else { n };
        Expr::new(ExprKind::Number(n))
    }

    /// Create a symbol expression (auto-interned)
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Expr::new(ExprKind::Symbol(get_or_intern(name.as_ref())))
    }

    /// Euler's number `e`
    pub fn euler() -> Self {
        Expr::symbol(ks::E)
    }

    /// The imaginary unit `i`
    pub fn imaginary_unit() -> Self {
        Expr::symbol(ks::I)
    }

    /// The constant `pi`
    pub fn pi() -> Self {
        Expr::symbol(ks::PI)
    }

    /// Unevaluated derivative node
    pub fn derivative_node(inner: Expr, var: InternedSymbol, order: u32) -> Self {
        Expr::new(ExprKind::Derivative {
            inner: Arc::new(inner),
            var,
            order,
        })
    }

    /// Multi-argument function call, kept as given
    pub fn func_multi(name: impl AsRef<str>, mut args: Vec<Expr>) -> Self {
        if args.len() == 1
            && let Some(arg) = args.pop()
        {
            return Expr::func(name, arg);
        }
        Expr::new(ExprKind::FunctionCall {
            name: get_or_intern(name.as_ref()),
            args: args.into_iter().map(Arc::new).collect(),
        })
    }

    // -------------------------------------------------------------------------
    // Coefficient / power decomposition
    // -------------------------------------------------------------------------

    /// Split into numeric coefficient and remaining factor.
    /// `3*x*y -> (3, Some(x*y))`, `x -> (1, Some(x))`, `5 -> (5, None)`.
    pub(crate) fn split_coefficient(&self) -> (f64, Option<Expr>) {
        match &self.kind {
            ExprKind::Number(n) => (*n, None),
            ExprKind::Product(factors) => match factors.first().and_then(|f| f.as_number()) {
                Some(c) if factors.len() == 2 => (c, Some((*factors[1]).clone())),
                Some(c) => (c, Some(Expr::new(ExprKind::Product(factors[1..].to_vec())))),
                None => (1.0, Some(self.clone())),
            },
            _ => (1.0, Some(self.clone())),
        }
    }

    /// Split into base and exponent. `x^2 -> (x, 2)`, `x -> (x, 1)`.
    pub(crate) fn split_power(&self) -> (Expr, Expr) {
        match &self.kind {
            ExprKind::Pow(base, exp) => ((**base).clone(), (**exp).clone()),
            _ => (self.clone(), Expr::number(1.0)),
        }
    }

    // -------------------------------------------------------------------------
    // N-ary Sum constructor
    // -------------------------------------------------------------------------

    /// Create a canonical sum: flattens nested sums, folds numbers, combines
    /// like terms (`2*x + 3*x -> 5*x`) and drops terms that cancel.
    pub fn sum(terms: Vec<Expr>) -> Self {
        let mut constant = 0.0;
        let mut parts: Vec<(Expr, f64)> = Vec::with_capacity(terms.len());
        let mut index: FxHashMap<Expr, usize> = FxHashMap::default();

        let mut pending = terms;
        while let Some(term) = pending.pop() {
            if let ExprKind::Sum(inner) = term.kind {
                pending.extend(inner.into_iter().map(Expr::unwrap_arc));
                continue;
            }
            match term.split_coefficient() {
                (c, None) => constant += c,
                (c, Some(rest)) => {
                    if let Some(&slot) = index.get(&rest) {
                        parts[slot].1 += c;
                    } else {
                        index.insert(rest.clone(), parts.len());
                        parts.push((rest, c));
                    }
                }
            }
        }

        let mut out: Vec<Expr> = parts
            .into_iter()
            .filter(|(_, c)| !is_zero(*c))
            .map(|(rest, c)| {
                if is_one(c) {
                    rest
                } else {
                    Expr::product(vec![Expr::number(c), rest])
                }
            })
            .collect();
        out.sort_by(expr_cmp);

        if !is_zero(constant) {
            out.insert(0, Expr::number(constant));
        }

        match out.len() {
            0 => Expr::number(0.0),
            1 => out.pop().unwrap_or_else(|| Expr::number(0.0)),
            _ => Expr::new(ExprKind::Sum(out.into_iter().map(Arc::new).collect())),
        }
    }

    // -------------------------------------------------------------------------
    // N-ary Product constructor
    // -------------------------------------------------------------------------

    /// Create a canonical product: flattens nested products, folds numeric
    /// factors, merges equal bases by adding exponents (`x*x^2 -> x^3`) and
    /// distributes a bare numeric coefficient over a single sum.
    pub fn product(factors: Vec<Expr>) -> Self {
        let mut coeff = 1.0;
        let mut groups: Vec<(Expr, Vec<Expr>)> = Vec::with_capacity(factors.len());
        let mut index: FxHashMap<Expr, usize> = FxHashMap::default();

        let mut pending = factors;
        while let Some(factor) = pending.pop() {
            match factor.kind {
                ExprKind::Product(inner) => {
                    pending.extend(inner.into_iter().map(Expr::unwrap_arc));
                }
                ExprKind::Number(n) => coeff *= n,
                _ => {
                    let (base, exp) = factor.split_power();
                    if let Some(&slot) = index.get(&base) {
                        groups[slot].1.push(exp);
                    } else {
                        index.insert(base.clone(), groups.len());
                        groups.push((base, vec![exp]));
                    }
                }
            }
        }

        if coeff == 0.0 {
            return Expr::number(0.0);
        }

        let mut out: Vec<Expr> = Vec::with_capacity(groups.len());
        for (base, exps) in groups {
            let merged = if exps.len() == 1 {
                Expr::pow(base, exps.into_iter().next().unwrap_or_else(|| Expr::number(1.0)))
            } else {
                Expr::pow(base, Expr::sum(exps))
            };
            match merged.kind {
                ExprKind::Number(n) => coeff *= n,
                ExprKind::Product(inner) => {
                    for f in inner {
                        match f.as_number() {
                            Some(n) => coeff *= n,
                            None => out.push(Expr::unwrap_arc(f)),
                        }
                    }
                }
                _ => out.push(merged),
            }
        }

        if coeff == 0.0 {
            return Expr::number(0.0);
        }
        if out.is_empty() {
            return Expr::number(coeff);
        }

        // c * (a + b) -> c*a + c*b
        if out.len() == 1 && !is_one(coeff) && matches!(out[0].kind, ExprKind::Sum(_)) {
            if let Some(ExprKind::Sum(terms)) = out.pop().map(|e| e.kind) {
                return Expr::sum(
                    terms
                        .into_iter()
                        .map(|t| Expr::product(vec![Expr::number(coeff), Expr::unwrap_arc(t)]))
                        .collect(),
                );
            }
        }

        out.sort_by(expr_cmp);
        if !is_one(coeff) {
            out.insert(0, Expr::number(coeff));
        }
        if out.len() == 1 {
            return out.pop().unwrap_or_else(|| Expr::number(coeff));
        }
        Expr::new(ExprKind::Product(out.into_iter().map(Arc::new).collect()))
    }

    // -------------------------------------------------------------------------
    // Power constructor
    // -------------------------------------------------------------------------

    /// Create a canonical power
    pub fn pow(base: Expr, exp: Expr) -> Self {
        if let Some(e) = exp.as_number() {
            if e == 0.0 {
                return Expr::number(1.0);
            }
            if e == 1.0 {
                return base;
            }
        }

        if let Some(b) = base.as_number() {
            if b == 1.0 {
                return Expr::number(1.0);
            }
            if let Some(e) = exp.as_number()
                && let Some(value) = fold_numeric_power(b, e)
            {
                return Expr::number(value);
            }
        }

        let integer_exp = exp.as_number().and_then(as_small_integer);

        match &base.kind {
            // e^u is written exp(u) everywhere
            ExprKind::Symbol(s) if s == ks::E => return Expr::func(ks::EXP, exp),

            ExprKind::Symbol(s) if s == ks::I => {
                if let Some(n) = integer_exp {
                    return match n.rem_euclid(4) {
                        0 => Expr::number(1.0),
                        1 => base,
                        2 => Expr::number(-1.0),
                        _ => Expr::product(vec![Expr::number(-1.0), base]),
                    };
                }
            }

            // (u^a)^n = u^(a*n) for integer n
            ExprKind::Pow(inner_base, inner_exp) if integer_exp.is_some() => {
                return Expr::pow(
                    (**inner_base).clone(),
                    Expr::product(vec![(**inner_exp).clone(), exp]),
                );
            }

            // (a*b)^n = a^n * b^n for integer n
            ExprKind::Product(factors) if integer_exp.is_some() => {
                return Expr::product(
                    factors
                        .iter()
                        .map(|f| Expr::pow((**f).clone(), exp.clone()))
                        .collect(),
                );
            }

            // exp(u)^n = exp(n*u) for integer n
            ExprKind::FunctionCall { name, args }
                if name == ks::EXP && args.len() == 1 && integer_exp.is_some() =>
            {
                return Expr::func(ks::EXP, Expr::product(vec![exp, (*args[0]).clone()]));
            }

            _ => {}
        }

        Expr::new(ExprKind::Pow(Arc::new(base), Arc::new(exp)))
    }

    // -------------------------------------------------------------------------
    // Function constructor
    // -------------------------------------------------------------------------

    /// Create a single-argument function call, folding trivial values
    pub fn func(name: impl AsRef<str>, arg: Expr) -> Self {
        let name = name.as_ref();
        match name {
            ks::SQRT => return Expr::pow(arg, Expr::number(0.5)),
            ks::EXP => {
                if arg.is_zero_num() {
                    return Expr::number(1.0);
                }
                if let Some(inner) = arg.function_arg(ks::LN) {
                    return inner.clone();
                }
            }
            ks::LN => {
                if arg.is_one_num() {
                    return Expr::number(0.0);
                }
                if arg.is_symbol(ks::E) {
                    return Expr::number(1.0);
                }
                if let Some(inner) = arg.function_arg(ks::EXP) {
                    return inner.clone();
                }
            }
            "sin" | "tan" | "sinh" if arg.is_zero_num() => return Expr::number(0.0),
            "cos" | "cosh" if arg.is_zero_num() => return Expr::number(1.0),
            _ => {}
        }
        Expr::new(ExprKind::FunctionCall {
            name: get_or_intern(name),
            args: vec![Arc::new(arg)],
        })
    }

    /// The argument of a single-argument call to `name`
    pub(crate) fn function_arg(&self, name: &str) -> Option<&Expr> {
        match &self.kind {
            ExprKind::FunctionCall { name: n, args } if n == name && args.len() == 1 => {
                Some(&args[0])
            }
            _ => None,
        }
    }

    /// Negation, `-1 * self`
    pub fn negate(self) -> Expr {
        Expr::product(vec![Expr::number(-1.0), self])
    }

    /// Reciprocal, `self^-1`
    pub fn recip(self) -> Expr {
        Expr::pow(self, Expr::number(-1.0))
    }

    // -------------------------------------------------------------------------
    // Analysis
    // -------------------------------------------------------------------------

    /// Count the total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Symbol(_) => 1,
            ExprKind::FunctionCall { args, .. }
            | ExprKind::Sum(args)
            | ExprKind::Product(args) => 1 + args.iter().map(|a| a.node_count()).sum::<usize>(),
            ExprKind::Pow(l, r) => 1 + l.node_count() + r.node_count(),
            ExprKind::Derivative { inner, .. } => 1 + inner.node_count(),
        }
    }

    /// Check if the expression contains a specific variable
    pub fn contains_var(&self, var: &str) -> bool {
        match &self.kind {
            ExprKind::Number(_) => false,
            ExprKind::Symbol(s) => s == var,
            ExprKind::FunctionCall { args, .. }
            | ExprKind::Sum(args)
            | ExprKind::Product(args) => args.iter().any(|a| a.contains_var(var)),
            ExprKind::Pow(l, r) => l.contains_var(var) || r.contains_var(var),
            ExprKind::Derivative { inner, var: v, .. } => v == var || inner.contains_var(var),
        }
    }

    /// Names of all symbols in the expression, named constants excluded
    pub fn free_symbols(&self) -> Vec<InternedSymbol> {
        let mut found = Vec::new();
        self.collect_symbols(&mut found);
        found.sort();
        found.dedup();
        found
    }

    fn collect_symbols(&self, found: &mut Vec<InternedSymbol>) {
        match &self.kind {
            ExprKind::Number(_) => {}
            ExprKind::Symbol(s) => {
                if !(s == ks::E || s == ks::I || s == ks::PI) {
                    found.push(s.clone());
                }
            }
            ExprKind::FunctionCall { args, .. }
            | ExprKind::Sum(args)
            | ExprKind::Product(args) => args.iter().for_each(|a| a.collect_symbols(found)),
            ExprKind::Pow(l, r) => {
                l.collect_symbols(found);
                r.collect_symbols(found);
            }
            ExprKind::Derivative { inner, .. } => inner.collect_symbols(found),
        }
    }

    // -------------------------------------------------------------------------
    // Substitution
    // -------------------------------------------------------------------------

    /// Replace every occurrence of the symbol `var` by `value`.
    /// The result is rebuilt through the canonical constructors.
    ///
    /// # Example
    /// ```
    /// use symb_solve::{Expr, symb};
    /// let x = symb("x");
    /// let y = symb("y");
    /// let expr = x.clone() * y.clone() + 1.0;
    /// assert_eq!(expr.substitute("x", &Expr::number(3.0)), 3.0 * y + 1.0);
    /// ```
    pub fn substitute(&self, var: &str, value: &Expr) -> Expr {
        if !self.contains_var(var) {
            return self.clone();
        }
        match &self.kind {
            ExprKind::Number(_) => self.clone(),
            ExprKind::Symbol(s) => {
                if s == var {
                    value.clone()
                } else {
                    self.clone()
                }
            }
            ExprKind::Sum(terms) => {
                Expr::sum(terms.iter().map(|t| t.substitute(var, value)).collect())
            }
            ExprKind::Product(factors) => {
                Expr::product(factors.iter().map(|f| f.substitute(var, value)).collect())
            }
            ExprKind::Pow(base, exp) => {
                Expr::pow(base.substitute(var, value), exp.substitute(var, value))
            }
            ExprKind::FunctionCall { name, args } => Expr::func_multi(
                name.name(),
                args.iter().map(|a| a.substitute(var, value)).collect(),
            ),
            // The differentiation variable names an axis, not a value
            ExprKind::Derivative {
                inner,
                var: axis,
                order,
            } => Expr::derivative_node(inner.substitute(var, value), axis.clone(), *order),
        }
    }
}

/// Fold `b^e` for numbers when the result is exact enough to keep as a number.
/// Non-integer powers of negative numbers are left symbolic (they are complex).
fn fold_numeric_power(b: f64, e: f64) -> Option<f64> {
    if let Some(n) = as_small_integer(e) {
        if b == 0.0 && n < 0 {
            return None;
        }
        let value = b.powi(n);
        return value.is_finite().then_some(value);
    }
    if b == 0.0 && e > 0.0 {
        return Some(0.0);
    }
    if b > 0.0 {
        return clean_integer(b.powf(e));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn y() -> Expr {
        Expr::symbol("y")
    }

    #[test]
    fn test_ids_and_structural_equality() {
        let e1 = Expr::number(1.0);
        let e2 = Expr::number(1.0);
        let e3 = Expr::number(2.0);

        assert_ne!(e1.id, e2.id);
        assert_eq!(e1, e2);
        assert_ne!(e1, e3);
        assert_eq!(Expr::number(-0.0), Expr::number(0.0));
    }

    #[test]
    fn test_sum_folds_numbers_and_like_terms() {
        let s = Expr::sum(vec![
            Expr::number(1.0),
            x(),
            Expr::number(2.0),
            Expr::product(vec![Expr::number(2.0), x()]),
        ]);
        assert_eq!(
            s,
            Expr::sum(vec![Expr::number(3.0), Expr::product(vec![Expr::number(3.0), x()])])
        );
    }

    #[test]
    fn test_sum_cancels_to_zero() {
        let s = Expr::sum(vec![x(), x().negate()]);
        assert!(s.is_zero_num());
    }

    #[test]
    fn test_sum_is_order_independent() {
        let a = Expr::sum(vec![x(), y(), Expr::number(1.0)]);
        let b = Expr::sum(vec![Expr::number(1.0), y(), x()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_product_merges_bases() {
        let p = Expr::product(vec![x(), Expr::pow(x(), Expr::number(2.0))]);
        assert_eq!(p, Expr::pow(x(), Expr::number(3.0)));

        let cancel = Expr::product(vec![x(), x().recip()]);
        assert!(cancel.is_one_num());
    }

    #[test]
    fn test_product_zero_and_distribution() {
        assert!(Expr::product(vec![Expr::number(0.0), x()]).is_zero_num());

        let distributed = Expr::product(vec![
            Expr::number(2.0),
            Expr::sum(vec![x(), Expr::number(1.0)]),
        ]);
        assert!(matches!(distributed.kind, ExprKind::Sum(_)));
    }

    #[test]
    fn test_pow_folding() {
        assert_eq!(Expr::pow(Expr::number(4.0), Expr::number(0.5)), Expr::number(2.0));
        assert_eq!(Expr::pow(Expr::number(2.0), Expr::number(-1.0)), Expr::number(0.5));
        assert!(matches!(
            Expr::pow(Expr::number(2.0), Expr::number(0.5)).kind,
            ExprKind::Pow(_, _)
        ));
        // sqrt of a negative number stays symbolic
        assert!(matches!(
            Expr::pow(Expr::number(-4.0), Expr::number(0.5)).kind,
            ExprKind::Pow(_, _)
        ));
        assert_eq!(Expr::pow(x(), Expr::number(1.0)), x());
        assert!(Expr::pow(x(), Expr::number(0.0)).is_one_num());
    }

    #[test]
    fn test_imaginary_unit_powers() {
        let i = Expr::imaginary_unit();
        assert!(Expr::product(vec![i.clone(), i.clone()]).is_neg_one_num());
        assert_eq!(Expr::pow(i.clone(), Expr::number(5.0)), i);
    }

    #[test]
    fn test_euler_power_becomes_exp() {
        let e = Expr::pow(Expr::euler(), x());
        assert_eq!(e, Expr::func("exp", x()));
    }

    #[test]
    fn test_function_folding() {
        assert!(Expr::func("exp", Expr::number(0.0)).is_one_num());
        assert!(Expr::func("ln", Expr::number(1.0)).is_zero_num());
        assert_eq!(Expr::func("ln", Expr::func("exp", x())), x());
        assert_eq!(Expr::func("exp", Expr::func("ln", x())), x());
        assert_eq!(Expr::func("sqrt", x()), Expr::pow(x(), Expr::number(0.5)));
    }

    #[test]
    fn test_substitute_rebuilds_canonically() {
        let expr = Expr::sum(vec![x(), y().negate(), Expr::number(-1.0)]);
        let reduced = expr.substitute("x", &Expr::sum(vec![Expr::number(3.0), y().negate()]));
        // 3 - y - y - 1 = 2 - 2y
        assert_eq!(
            reduced,
            Expr::sum(vec![
                Expr::number(2.0),
                Expr::product(vec![Expr::number(-2.0), y()])
            ])
        );
    }

    #[test]
    fn test_contains_var_and_free_symbols() {
        let expr = Expr::sum(vec![
            Expr::product(vec![x(), y()]),
            Expr::func("exp", Expr::imaginary_unit()),
        ]);
        assert!(expr.contains_var("x"));
        assert!(!expr.contains_var("z"));
        let names: Vec<String> = expr.free_symbols().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_func_multi_arity() {
        assert_eq!(Expr::func_multi("exp", vec![Expr::number(0.0)]), Expr::number(1.0));
        let two = Expr::func_multi("f", vec![x(), y()]);
        match &two.kind {
            ExprKind::FunctionCall { name, args } => {
                assert_eq!(name.name(), "f");
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected a call, got {other:?}"),
        }
    }

    #[test]
    fn test_node_count() {
        assert_eq!(x().node_count(), 1);
        let x_plus_1 = Expr::sum(vec![x(), Expr::number(1.0)]);
        assert_eq!(x_plus_1.node_count(), 3);
    }
}
