//! Core types for symbolic equation solving
//!
//! This module contains the fundamental types:
//! - `Expr` / `ExprKind` - canonical expression tree
//! - `InternedSymbol` - symbol interning
//! - `SolveError` - error type
//! - Display formatting and operator overloads

mod display;
pub(crate) mod error;
pub(crate) mod expr;
pub(crate) mod known_symbols;
mod ops;
pub(crate) mod ordering;
pub(crate) mod symbol;
pub(crate) mod traits;

pub use error::SolveError;
pub use expr::{Expr, ExprKind};
pub use symbol::{InternedSymbol, symbol_count, symbol_exists};
