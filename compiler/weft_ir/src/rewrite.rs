//! In-place tree rewriting.
//!
//! Provides generic mutable traversal of the arena tree. Each rewrite pass
//! overrides the `rewrite_*` hooks for the node kinds it cares about and
//! delegates everything else to the `walk_*` defaults, which recurse into
//! children depth-first, left to right.
//!
//! Node kinds are closed enums, so every walk is an exhaustive match:
//! adding a variant forces every traversal to handle it.
//!
//! A hook that rewrites a node typically mutates first and recurses after
//! (by calling the matching `walk_*`), so freshly built subtrees are
//! themselves traversed — nested closures inside a repaired trailing-lambda
//! call still get their own group markers, for example.
//!
//! # Example
//!
//! ```text
//! struct CountCalls { count: usize }
//!
//! impl Rewriter for CountCalls {
//!     type Error = Infallible;
//!     fn rewrite_expr(&mut self, arena: &mut TreeArena, id: ExprId) -> Result<(), Self::Error> {
//!         if matches!(arena.expr(id).kind, ExprKind::Call { .. }) {
//!             self.count += 1;
//!         }
//!         walk_expr(self, arena, id)
//!     }
//! }
//! ```

use crate::ast::{ExprKind, Function, LambdaBody, Module, StmtKind};
use crate::{BlockId, ExprId, StmtId, TreeArena};

/// Mutable tree traversal with overridable per-node hooks.
pub trait Rewriter {
    /// Error produced when a pass observes a contract violation.
    type Error;

    /// Rewrite a module.
    fn rewrite_module(
        &mut self,
        arena: &mut TreeArena,
        module: &mut Module,
    ) -> Result<(), Self::Error> {
        walk_module(self, arena, module)
    }

    /// Rewrite a function declaration.
    fn rewrite_function(
        &mut self,
        arena: &mut TreeArena,
        function: &mut Function,
    ) -> Result<(), Self::Error> {
        walk_function(self, arena, function)
    }

    /// Rewrite a statement block.
    fn rewrite_block(&mut self, arena: &mut TreeArena, id: BlockId) -> Result<(), Self::Error> {
        walk_block(self, arena, id)
    }

    /// Rewrite a statement.
    fn rewrite_stmt(&mut self, arena: &mut TreeArena, id: StmtId) -> Result<(), Self::Error> {
        walk_stmt(self, arena, id)
    }

    /// Rewrite an expression.
    fn rewrite_expr(&mut self, arena: &mut TreeArena, id: ExprId) -> Result<(), Self::Error> {
        walk_expr(self, arena, id)
    }
}

/// Walk a module's function declarations in order.
pub fn walk_module<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    arena: &mut TreeArena,
    module: &mut Module,
) -> Result<(), R::Error> {
    for function in &mut module.functions {
        rewriter.rewrite_function(arena, function)?;
    }
    Ok(())
}

/// Walk a function's body, if present.
pub fn walk_function<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    arena: &mut TreeArena,
    function: &mut Function,
) -> Result<(), R::Error> {
    if function.body.is_valid() {
        rewriter.rewrite_block(arena, function.body)?;
    }
    Ok(())
}

/// Walk a block's statements in order.
///
/// The statement-ID list is snapshotted up front: hooks may swap the
/// block's range for a rebuilt one, and node IDs are stable, so the
/// snapshot stays valid across rewrites.
pub fn walk_block<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    arena: &mut TreeArena,
    id: BlockId,
) -> Result<(), R::Error> {
    let stmts = arena.stmt_list(arena.block(id).stmts).to_vec();
    for stmt in stmts {
        rewriter.rewrite_stmt(arena, stmt)?;
    }
    Ok(())
}

/// Walk a statement's children.
pub fn walk_stmt<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    arena: &mut TreeArena,
    id: StmtId,
) -> Result<(), R::Error> {
    match arena.stmt(id).kind {
        StmtKind::Expr(expr) => rewriter.rewrite_expr(arena, expr),
        StmtKind::Local { init, .. } => {
            if init.is_valid() {
                rewriter.rewrite_expr(arena, init)?;
            }
            Ok(())
        }
        StmtKind::If {
            cond,
            then_block,
            else_block,
        } => {
            rewriter.rewrite_expr(arena, cond)?;
            rewriter.rewrite_block(arena, then_block)?;
            if else_block.is_valid() {
                rewriter.rewrite_block(arena, else_block)?;
            }
            Ok(())
        }
        StmtKind::Block(block) => rewriter.rewrite_block(arena, block),
    }
}

/// Walk an expression's children.
pub fn walk_expr<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    arena: &mut TreeArena,
    id: ExprId,
) -> Result<(), R::Error> {
    match arena.expr(id).kind {
        ExprKind::Int(_)
        | ExprKind::Bool(_)
        | ExprKind::Str(_)
        | ExprKind::Null
        | ExprKind::Ident(_) => Ok(()),
        ExprKind::Binary { left, right, .. } => {
            rewriter.rewrite_expr(arena, left)?;
            rewriter.rewrite_expr(arena, right)
        }
        ExprKind::Assign { target, value } => {
            rewriter.rewrite_expr(arena, target)?;
            rewriter.rewrite_expr(arena, value)
        }
        ExprKind::Field { receiver, .. } => rewriter.rewrite_expr(arena, receiver),
        ExprKind::Call { callee, args } => {
            rewriter.rewrite_expr(arena, callee)?;
            let args = arena.expr_list(args).to_vec();
            for arg in args {
                rewriter.rewrite_expr(arena, arg)?;
            }
            Ok(())
        }
        ExprKind::Lambda { body, .. } => match body {
            LambdaBody::Block(block) => rewriter.rewrite_block(arena, block),
            LambdaBody::Expr(expr) => rewriter.rewrite_expr(arena, expr),
        },
        ExprKind::Error(parts) => {
            let parts = arena.expr_list(parts).to_vec();
            for part in parts {
                rewriter.rewrite_expr(arena, part)?;
            }
            Ok(())
        }
    }
}
