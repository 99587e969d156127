//! Binary operators.

use std::fmt;

/// Binary operator.
///
/// Only the operators the rewrite pipeline reads or emits are modeled:
/// bitwise mask tests (`&`, `|`), comparisons against sentinel values
/// (`==`, `!=`), and the short-circuit conjunction of the skip guard.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    /// Bitwise and: `a & b`
    BitAnd,
    /// Bitwise or: `a | b`
    BitOr,
    /// Equality: `a == b`
    Eq,
    /// Inequality: `a != b`
    Ne,
    /// Short-circuit conjunction: `a && b`
    And,
}

impl BinaryOp {
    /// Source-level symbol for this operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&&",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
