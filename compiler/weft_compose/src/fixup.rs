//! Trailing-lambda call repair.
//!
//! The surface syntax lets a composable call take its content closure as a
//! trailing block:
//!
//! ```text
//! Column {
//!     Text(title);
//! }
//! ```
//!
//! The front-end cannot parse that shape as a call. It recovers by
//! emitting two adjacent statements: an error node wrapping the bare
//! `Column` identifier, then the block as a free-standing nested block.
//! This pass reunites such pairs into the call the user meant — the
//! identifier invoked with a single zero-parameter closure whose body is
//! the block — so every later stage sees ordinary calls and lambdas.
//!
//! Purely pattern-based: statements that don't form the pair copy through
//! unchanged, and a block with no matches keeps its original statement
//! range. The rebuilt call and closure take the block's span, which the
//! group instrumentation stage later reads for positional identity.

use smallvec::SmallVec;

use weft_ir::rewrite::{walk_block, Rewriter};
use weft_ir::{
    BlockId, Expr, ExprKind, LambdaBody, Module, Name, ParamRange, Stmt, StmtId, StmtKind,
    TreeArena,
};

use crate::error::PipelineError;
use crate::pipeline::RewritePass;

/// Repairs error-node/block statement pairs into trailing-lambda calls.
pub struct TrailingLambdaFixup {
    repaired: usize,
}

impl TrailingLambdaFixup {
    pub fn new() -> Self {
        TrailingLambdaFixup { repaired: 0 }
    }
}

impl Default for TrailingLambdaFixup {
    fn default() -> Self {
        Self::new()
    }
}

impl RewritePass for TrailingLambdaFixup {
    fn name(&self) -> &'static str {
        "trailing-lambda-fixup"
    }

    fn run(&mut self, arena: &mut TreeArena, module: &mut Module) -> Result<(), PipelineError> {
        self.rewrite_module(arena, module)?;
        tracing::debug!(repaired = self.repaired, "trailing-lambda calls repaired");
        Ok(())
    }
}

impl Rewriter for TrailingLambdaFixup {
    type Error = PipelineError;

    fn rewrite_block(&mut self, arena: &mut TreeArena, id: BlockId) -> Result<(), Self::Error> {
        let old = arena.stmt_list(arena.block(id).stmts).to_vec();
        let mut new: SmallVec<[StmtId; 8]> = SmallVec::with_capacity(old.len());
        let mut changed = false;

        let mut i = 0;
        while i < old.len() {
            if i + 1 < old.len() {
                if let (Some(callee), StmtKind::Block(body)) =
                    (erroneous_ident(arena, old[i]), arena.stmt(old[i + 1]).kind)
                {
                    new.push(repair_call(arena, callee, body));
                    // The block statement is consumed by the repaired call.
                    i += 2;
                    changed = true;
                    self.repaired += 1;
                    continue;
                }
            }
            new.push(old[i]);
            i += 1;
        }

        if changed {
            let stmts = arena.alloc_stmt_list(new);
            arena.block_mut(id).stmts = stmts;
        }

        // Recurse after the rewrite so the repaired closures' bodies (and
        // any pairs nested inside them) are visited too.
        walk_block(self, arena, id)
    }
}

/// Match an expression statement wrapping an error node whose sole
/// recovered fragment is a bare identifier, and return that identifier.
fn erroneous_ident(arena: &TreeArena, stmt: StmtId) -> Option<Name> {
    let StmtKind::Expr(expr) = arena.stmt(stmt).kind else {
        return None;
    };
    let ExprKind::Error(parts) = arena.expr(expr).kind else {
        return None;
    };
    let parts = arena.expr_list(parts);
    if parts.len() != 1 {
        return None;
    }
    match arena.expr(parts[0]).kind {
        ExprKind::Ident(name) => Some(name),
        _ => None,
    }
}

/// Build `callee({ body })`: the identifier invoked with one
/// zero-parameter closure. New nodes take the body block's span.
fn repair_call(arena: &mut TreeArena, callee: Name, body: BlockId) -> StmtId {
    let span = arena.block(body).span;
    let lambda = arena.alloc_expr(Expr::new(
        ExprKind::Lambda {
            params: ParamRange::EMPTY,
            body: LambdaBody::Block(body),
        },
        span,
    ));
    let callee = arena.alloc_expr(Expr::new(ExprKind::Ident(callee), span));
    let args = arena.alloc_expr_list([lambda]);
    let call = arena.alloc_expr(Expr::new(ExprKind::Call { callee, args }, span));
    arena.alloc_stmt(Stmt::new(StmtKind::Expr(call), span))
}
