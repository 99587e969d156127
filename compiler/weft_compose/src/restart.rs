//! Body recomposition: the skip fast-path and restart registration.
//!
//! A composable body is rebuilt into four statements:
//!
//! ```text
//! $composer = $composer.startRestartGroup(key);
//! if (($changed & 1) == 0 && $composer.getSkipping()) {
//!     $composer.skipToGroupEnd();
//! } else {
//!     <original body>
//! }
//! $scope: Scope = $composer.endRestartGroup();
//! if ($scope != null) {
//!     $scope.updateScope((c, i) -> { F(<user args>, c, $changed | 1); });
//! }
//! ```
//!
//! The restart key is a hash of the bare function name; same-named
//! functions in different scopes collide. Known limitation.
//!
//! Bit 0 of `$changed` is the force-recompose flag. The skip branch is
//! only reachable when the caller left it unset *and* the runtime
//! independently reports a skipping pass; the restart closure replays the
//! call with `$changed | 1` so a forced re-execution can never skip.
//!
//! This stage consumes the implicit parameters that signature augmentation
//! appended. A composable-shaped declaration without them means the
//! pipeline ran out of order, which is a contract violation, not a
//! pattern non-match.

use smallvec::SmallVec;

use weft_ir::{
    BinaryOp, Block, BlockId, Expr, ExprId, ExprKind, Function, LambdaBody, Module, Name, Param,
    ParamRole, Span, Stmt, StmtId, StmtKind, StringInterner, TreeArena, TypeRef,
};

use crate::emit;
use crate::error::PipelineError;
use crate::key;
use crate::names::{is_composable_decl, WellKnown};
use crate::pipeline::RewritePass;

/// Rebuilds composable bodies around the skip/restart structure.
pub struct BodyRecomposer<'a> {
    interner: &'a StringInterner,
    names: WellKnown,
    recomposed: usize,
}

impl<'a> BodyRecomposer<'a> {
    pub fn new(interner: &'a StringInterner, names: WellKnown) -> Self {
        BodyRecomposer {
            interner,
            names,
            recomposed: 0,
        }
    }

    /// The implicit parameters must be the last two, in role order
    /// (`Composer`, `Changed`).
    fn has_implicit_params(&self, arena: &TreeArena, function: &Function) -> bool {
        let params = arena.params(function.params);
        match params {
            [.., composer, changed] => {
                composer.role == ParamRole::Composer && changed.role == ParamRole::Changed
            }
            _ => false,
        }
    }

    fn recompose(&mut self, arena: &mut TreeArena, function: &mut Function) {
        let restart_key = key::name_key(self.interner.lookup(function.name));
        let original_body = function.body;
        let span = arena.block(original_body).span;

        // $composer = $composer.startRestartGroup(key)
        let receiver = emit::ident(arena, self.names.composer_param);
        let key_lit = emit::int_lit(arena, i64::from(restart_key));
        let start = emit::method_call(arena, receiver, self.names.start_restart_group, &[key_lit]);
        let target = emit::ident(arena, self.names.composer_param);
        let assign = arena.alloc_expr(Expr::new(
            ExprKind::Assign {
                target,
                value: start,
            },
            Span::DUMMY,
        ));
        let start_group = emit::expr_stmt(arena, assign);

        // if (($changed & 1) == 0 && $composer.getSkipping())
        //     { $composer.skipToGroupEnd(); } else { <original body> }
        let cond = self.skip_condition(arena);
        let receiver = emit::ident(arena, self.names.composer_param);
        let skip = emit::method_call(arena, receiver, self.names.skip_to_group_end, &[]);
        let skip = emit::expr_stmt(arena, skip);
        let skip_stmts = arena.alloc_stmt_list([skip]);
        let skip_block = arena.alloc_block(Block::new(skip_stmts, Span::DUMMY));
        let if_skipping = arena.alloc_stmt(Stmt::new(
            StmtKind::If {
                cond,
                then_block: skip_block,
                else_block: original_body,
            },
            Span::DUMMY,
        ));

        // $scope: Scope = $composer.endRestartGroup()
        let receiver = emit::ident(arena, self.names.composer_param);
        let end = emit::method_call(arena, receiver, self.names.end_restart_group, &[]);
        let scope_decl = arena.alloc_stmt(Stmt::new(
            StmtKind::Local {
                name: self.names.scope_local,
                ty: TypeRef::Named(self.names.scope_ty),
                init: end,
            },
            Span::DUMMY,
        ));

        let restart_guard = self.restart_guard(arena, function);

        let stmts = arena.alloc_stmt_list([start_group, if_skipping, scope_decl, restart_guard]);
        function.body = arena.alloc_block(Block::new(stmts, span));
        self.recomposed += 1;
    }

    /// `($changed & 1) == 0 && $composer.getSkipping()`
    ///
    /// Both operands must hold to skip: the caller left the force bit
    /// clear, and the runtime says this is a skipping pass.
    fn skip_condition(&self, arena: &mut TreeArena) -> ExprId {
        let changed = emit::ident(arena, self.names.changed_param);
        let one = emit::int_lit(arena, 1);
        let force_bit = emit::binary(arena, BinaryOp::BitAnd, changed, one);
        let zero = emit::int_lit(arena, 0);
        let not_forced = emit::binary(arena, BinaryOp::Eq, force_bit, zero);

        let receiver = emit::ident(arena, self.names.composer_param);
        let skipping = emit::method_call(arena, receiver, self.names.get_skipping, &[]);

        emit::binary(arena, BinaryOp::And, not_forced, skipping)
    }

    /// `if ($scope != null) { $scope.updateScope((c, i) -> { ... }); }`
    ///
    /// The closure body re-enters the function with the user arguments
    /// forwarded unchanged, the closure's own composer, and the mask with
    /// the force bit set.
    fn restart_guard(&self, arena: &mut TreeArena, function: &Function) -> StmtId {
        let user_params: SmallVec<[Name; 8]> = arena
            .params(function.params)
            .iter()
            .filter(|p| p.role == ParamRole::User)
            .map(|p| p.name)
            .collect();

        let mut args: SmallVec<[ExprId; 10]> = user_params
            .iter()
            .map(|&name| emit::ident(arena, name))
            .collect();
        args.push(emit::ident(arena, self.names.restart_composer));
        let changed = emit::ident(arena, self.names.changed_param);
        let one = emit::int_lit(arena, 1);
        args.push(emit::binary(arena, BinaryOp::BitOr, changed, one));

        let callee = emit::ident(arena, function.name);
        let args = arena.alloc_expr_list(args);
        let replay = arena.alloc_expr(Expr::new(ExprKind::Call { callee, args }, Span::DUMMY));
        let replay = emit::expr_stmt(arena, replay);
        let body_stmts = arena.alloc_stmt_list([replay]);
        let body = arena.alloc_block(Block::new(body_stmts, Span::DUMMY));

        let params = arena.alloc_params([
            Param {
                name: self.names.restart_composer,
                ty: TypeRef::Named(self.names.composer_ty),
                role: ParamRole::User,
                span: Span::DUMMY,
            },
            Param {
                name: self.names.restart_changed,
                ty: TypeRef::Int,
                role: ParamRole::User,
                span: Span::DUMMY,
            },
        ]);
        let callback = arena.alloc_expr(Expr::new(
            ExprKind::Lambda {
                params,
                body: LambdaBody::Block(body),
            },
            Span::DUMMY,
        ));

        let scope = emit::ident(arena, self.names.scope_local);
        let update = emit::method_call(arena, scope, self.names.update_scope, &[callback]);
        let update = emit::expr_stmt(arena, update);
        let then_stmts = arena.alloc_stmt_list([update]);
        let then_block = arena.alloc_block(Block::new(then_stmts, Span::DUMMY));

        let scope = emit::ident(arena, self.names.scope_local);
        let null = arena.alloc_expr(Expr::new(ExprKind::Null, Span::DUMMY));
        let cond = emit::binary(arena, BinaryOp::Ne, scope, null);
        arena.alloc_stmt(Stmt::new(
            StmtKind::If {
                cond,
                then_block,
                else_block: BlockId::INVALID,
            },
            Span::DUMMY,
        ))
    }
}

impl RewritePass for BodyRecomposer<'_> {
    fn name(&self) -> &'static str {
        "body-recomposition"
    }

    fn run(&mut self, arena: &mut TreeArena, module: &mut Module) -> Result<(), PipelineError> {
        for function in &mut module.functions {
            if !is_composable_decl(self.interner, function) || !function.body.is_valid() {
                continue;
            }
            if !self.has_implicit_params(arena, function) {
                return Err(PipelineError::MissingImplicitParams {
                    function: self.interner.lookup(function.name).to_owned(),
                });
            }
            self.recompose(arena, function);
        }
        tracing::debug!(recomposed = self.recomposed, "composable bodies rebuilt");
        Ok(())
    }
}
