//! Expression node and variants.

use std::fmt;

use super::operators::BinaryOp;
use crate::{BlockId, ExprId, ExprRange, Name, ParamRange, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
///
/// All children are indices, not boxes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: 42
    Int(i64),

    /// Boolean literal: true, false
    Bool(bool),

    /// String literal (interned)
    Str(Name),

    /// Null literal, used in generated scope-handle guards
    Null,

    /// Variable or function reference
    Ident(Name),

    /// Binary operation: left op right
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Assignment: target = value
    Assign { target: ExprId, value: ExprId },

    /// Member access: receiver.field
    Field { receiver: ExprId, field: Name },

    /// Call: callee(args...). The callee is a bare `Ident` for free
    /// function calls or a `Field` for method-style calls on a receiver.
    Call { callee: ExprId, args: ExprRange },

    /// Closure: (params) -> body
    Lambda { params: ParamRange, body: LambdaBody },

    /// Error-recovery node from the front-end, carrying the raw unparsed
    /// sub-fragments. The syntax fixup pass consumes single-identifier
    /// error nodes; everything else passes through untouched.
    Error(ExprRange),
}

/// Body of a closure: either a statement block or a bare expression.
///
/// Group instrumentation only brackets block bodies; expression-bodied
/// closures get no positional identity marker.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LambdaBody {
    Block(BlockId),
    Expr(ExprId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_kind_equality_is_structural() {
        let a = ExprKind::Binary {
            op: BinaryOp::BitAnd,
            left: ExprId::new(0),
            right: ExprId::new(1),
        };
        let b = ExprKind::Binary {
            op: BinaryOp::BitAnd,
            left: ExprId::new(0),
            right: ExprId::new(1),
        };
        assert_eq!(a, b);
        assert_ne!(a, ExprKind::Null);
    }

    #[test]
    fn expr_debug_includes_span() {
        let expr = Expr::new(ExprKind::Int(7), Span::new(3, 4));
        assert_eq!(format!("{expr:?}"), "Int(7) @ 3..4");
    }
}
