//! Names with a fixed meaning in expressions
//!
//! `e`, `i` and `pi` are ordinary symbols structurally, but evaluation and the
//! canonical constructors give them their mathematical meaning.

/// Natural exponential base
pub(crate) const E: &str = "e";
/// Imaginary unit
pub(crate) const I: &str = "i";
/// Circle constant
pub(crate) const PI: &str = "pi";

pub(crate) const EXP: &str = "exp";
pub(crate) const LN: &str = "ln";
pub(crate) const SQRT: &str = "sqrt";
