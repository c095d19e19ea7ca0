//! Centralized mathematical function registry
//!
//! Single source of truth for the elementary functions the solver knows:
//! how to evaluate them and how to differentiate them.

use std::sync::Arc;

use crate::Expr;

pub(crate) mod definitions;
pub(crate) mod registry;

// ===== Helper functions for building derivative expressions =====

/// Re-apply a function to a shared argument
pub(crate) fn func_arc(name: &str, arg: &Arc<Expr>) -> Expr {
    Expr::func(name, (**arg).clone())
}

/// Multiply, short-circuiting the common 0 and 1 cases
pub(crate) fn mul_opt(a: Expr, b: Expr) -> Expr {
    if a.is_zero_num() || b.is_zero_num() {
        return Expr::number(0.0);
    }
    if a.is_one_num() {
        return b;
    }
    if b.is_one_num() {
        return a;
    }
    Expr::product(vec![a, b])
}
