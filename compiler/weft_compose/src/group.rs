//! Replaceable-group bracketing of closure bodies.
//!
//! Recomposition re-runs closures out of order and must still correlate
//! "this execution" with "that closure last time". The correlation handle
//! is the group key: a 32-bit identity derived from the file-identity hash
//! and the closure's byte offset, stable across recompiles of unchanged
//! source. Each block-bodied closure is bracketed with
//! `$composer.startReplaceableGroup(key)` / `$composer.endReplaceableGroup()`
//! so the runtime can delimit the closure's slot table entries.
//!
//! The file hash is pass-local state computed once at module entry from the
//! unit's source path (0 when the unit has no backing file), so repeated
//! runs over different units never observe each other's state.
//!
//! Expression-bodied closures are not bracketed; they get no positional
//! identity. Known limitation.

use weft_ir::rewrite::{walk_expr, walk_module, Rewriter};
use weft_ir::{BlockId, ExprId, ExprKind, LambdaBody, Module, Name, StringInterner, TreeArena};

use crate::emit;
use crate::error::PipelineError;
use crate::key;
use crate::names::WellKnown;
use crate::pipeline::RewritePass;

/// Brackets block-bodied closures with positional group markers.
pub struct GroupInstrumenter<'a> {
    interner: &'a StringInterner,
    names: WellKnown,
    file_hash: i32,
    bracketed: usize,
}

impl<'a> GroupInstrumenter<'a> {
    pub fn new(interner: &'a StringInterner, names: WellKnown) -> Self {
        GroupInstrumenter {
            interner,
            names,
            file_hash: 0,
            bracketed: 0,
        }
    }

    /// Prepend the start-group call and append the end-group call to the
    /// closure body.
    fn bracket(&mut self, arena: &mut TreeArena, body: BlockId, group_key: i32) {
        let receiver = emit::ident(arena, self.names.composer_param);
        let key_lit = emit::int_lit(arena, i64::from(group_key));
        let start = emit::method_call(
            arena,
            receiver,
            self.names.start_replaceable_group,
            &[key_lit],
        );
        let start = emit::expr_stmt(arena, start);

        let receiver = emit::ident(arena, self.names.composer_param);
        let end = emit::method_call(arena, receiver, self.names.end_replaceable_group, &[]);
        let end = emit::expr_stmt(arena, end);

        let old = arena.stmt_list(arena.block(body).stmts).to_vec();
        let stmts =
            arena.alloc_stmt_list(std::iter::once(start).chain(old).chain(std::iter::once(end)));
        arena.block_mut(body).stmts = stmts;
        self.bracketed += 1;
    }
}

impl RewritePass for GroupInstrumenter<'_> {
    fn name(&self) -> &'static str {
        "group-instrumentation"
    }

    fn run(&mut self, arena: &mut TreeArena, module: &mut Module) -> Result<(), PipelineError> {
        self.rewrite_module(arena, module)?;
        tracing::debug!(
            file_hash = self.file_hash,
            bracketed = self.bracketed,
            "closure bodies bracketed"
        );
        Ok(())
    }
}

impl Rewriter for GroupInstrumenter<'_> {
    type Error = PipelineError;

    fn rewrite_module(
        &mut self,
        arena: &mut TreeArena,
        module: &mut Module,
    ) -> Result<(), Self::Error> {
        self.file_hash = if module.source_path == Name::EMPTY {
            0
        } else {
            key::file_identity_hash(self.interner.lookup(module.source_path))
        };
        walk_module(self, arena, module)
    }

    fn rewrite_expr(&mut self, arena: &mut TreeArena, id: ExprId) -> Result<(), Self::Error> {
        if let ExprKind::Lambda {
            body: LambdaBody::Block(body),
            ..
        } = arena.expr(id).kind
        {
            let group_key = key::source_key(self.file_hash, arena.expr(id).span.start);
            self.bracket(arena, body, group_key);
        }
        // Recurse after bracketing so nested closures get their own markers.
        walk_expr(self, arena, id)
    }
}
