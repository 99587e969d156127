//! Small builders for the node shapes the passes emit.
//!
//! Generated nodes carry `Span::DUMMY`; only nodes whose position feeds a
//! group key (the repaired trailing-lambda calls) get real spans, and the
//! fixup pass stamps those itself.

use weft_ir::{BinaryOp, Expr, ExprId, ExprKind, Name, Span, Stmt, StmtId, StmtKind, TreeArena};

/// `name`
pub(crate) fn ident(arena: &mut TreeArena, name: Name) -> ExprId {
    arena.alloc_expr(Expr::new(ExprKind::Ident(name), Span::DUMMY))
}

/// `value`
pub(crate) fn int_lit(arena: &mut TreeArena, value: i64) -> ExprId {
    arena.alloc_expr(Expr::new(ExprKind::Int(value), Span::DUMMY))
}

/// `left op right`
pub(crate) fn binary(arena: &mut TreeArena, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
    arena.alloc_expr(Expr::new(ExprKind::Binary { op, left, right }, Span::DUMMY))
}

/// `receiver.method(args...)`
pub(crate) fn method_call(
    arena: &mut TreeArena,
    receiver: ExprId,
    method: Name,
    args: &[ExprId],
) -> ExprId {
    let callee = arena.alloc_expr(Expr::new(
        ExprKind::Field {
            receiver,
            field: method,
        },
        Span::DUMMY,
    ));
    let args = arena.alloc_expr_list(args.iter().copied());
    arena.alloc_expr(Expr::new(ExprKind::Call { callee, args }, Span::DUMMY))
}

/// `expr;`
pub(crate) fn expr_stmt(arena: &mut TreeArena, expr: ExprId) -> StmtId {
    arena.alloc_stmt(Stmt::new(StmtKind::Expr(expr), Span::DUMMY))
}
