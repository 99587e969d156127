//! Call-site argument injection.
//!
//! Every call to a composable function must supply the two implicit
//! arguments the augmented signature expects: the composition context and
//! the packed change masks. This pass appends them — a `$composer`
//! reference, then one mask literal per 10-argument chunk of the original
//! argument list (at least one, even for a zero-argument call).
//!
//! Eligibility mirrors the declaration-side convention: the callee must be
//! a bare uppercase-initial identifier. The pipeline runs before
//! attribution, so there is no way to ask whether the target really is
//! composable; every syntactically-eligible call is instrumented
//! uniformly. Method-style calls have a field-access callee and are never
//! eligible, which keeps the composer calls emitted by the other passes
//! out of reach.

use smallvec::SmallVec;

use weft_ir::rewrite::{walk_expr, Rewriter};
use weft_ir::{ExprId, ExprKind, ExprRange, Module, StringInterner, TreeArena};

use crate::emit;
use crate::error::PipelineError;
use crate::mask::{self, Stability};
use crate::names::{uppercase_initial, WellKnown};
use crate::pipeline::RewritePass;

/// Appends `$composer` and the change-mask literals to composable calls.
pub struct CallSiteInstrumenter<'a> {
    interner: &'a StringInterner,
    names: WellKnown,
    instrumented: usize,
}

impl<'a> CallSiteInstrumenter<'a> {
    pub fn new(interner: &'a StringInterner, names: WellKnown) -> Self {
        CallSiteInstrumenter {
            interner,
            names,
            instrumented: 0,
        }
    }

    fn is_composable_callee(&self, arena: &TreeArena, callee: ExprId) -> bool {
        match arena.expr(callee).kind {
            ExprKind::Ident(name) => uppercase_initial(self.interner.lookup(name)),
            _ => false,
        }
    }

    fn instrument(&mut self, arena: &mut TreeArena, call: ExprId, callee: ExprId, args: ExprRange) {
        let original = arena.expr_list(args).to_vec();
        let stabilities: SmallVec<[Stability; 10]> = original
            .iter()
            .map(|&arg| mask::classify(&arena.expr(arg).kind))
            .collect();

        let mut new_args: SmallVec<[ExprId; 12]> = SmallVec::from_vec(original);
        new_args.push(emit::ident(arena, self.names.composer_param));
        for chunk in 0..mask::mask_count(stabilities.len()) {
            let mask = mask::chunk_mask(&stabilities, chunk);
            new_args.push(emit::int_lit(arena, i64::from(mask)));
        }

        let args = arena.alloc_expr_list(new_args);
        arena.expr_mut(call).kind = ExprKind::Call { callee, args };
        self.instrumented += 1;
    }
}

impl RewritePass for CallSiteInstrumenter<'_> {
    fn name(&self) -> &'static str {
        "call-site-instrumentation"
    }

    fn run(&mut self, arena: &mut TreeArena, module: &mut Module) -> Result<(), PipelineError> {
        self.rewrite_module(arena, module)?;
        tracing::debug!(
            instrumented = self.instrumented,
            "composable call sites instrumented"
        );
        Ok(())
    }
}

impl Rewriter for CallSiteInstrumenter<'_> {
    type Error = PipelineError;

    fn rewrite_expr(&mut self, arena: &mut TreeArena, id: ExprId) -> Result<(), Self::Error> {
        if let ExprKind::Call { callee, args } = arena.expr(id).kind {
            if self.is_composable_callee(arena, callee) {
                self.instrument(arena, id, callee, args);
            }
        }
        // Recurse after instrumenting: calls nested in the original
        // arguments (inside lambda bodies, say) are eligible too.
        walk_expr(self, arena, id)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use weft_ir::{
        Block, Expr, Function, LambdaBody, ParamRange, Span, Stmt, StmtKind, StmtRange,
    };

    struct Fixture {
        interner: StringInterner,
        arena: TreeArena,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                interner: StringInterner::new(),
                arena: TreeArena::new(),
            }
        }

        fn call(&mut self, callee: &str, args: &[ExprId]) -> ExprId {
            let name = self.interner.intern(callee);
            let callee = self
                .arena
                .alloc_expr(Expr::new(ExprKind::Ident(name), Span::DUMMY));
            let args = self.arena.alloc_expr_list(args.iter().copied());
            self.arena
                .alloc_expr(Expr::new(ExprKind::Call { callee, args }, Span::DUMMY))
        }

        fn str_lit(&mut self, value: &str) -> ExprId {
            let name = self.interner.intern(value);
            self.arena
                .alloc_expr(Expr::new(ExprKind::Str(name), Span::DUMMY))
        }

        fn lambda(&mut self) -> ExprId {
            let body = self
                .arena
                .alloc_block(Block::new(StmtRange::EMPTY, Span::DUMMY));
            self.arena.alloc_expr(Expr::new(
                ExprKind::Lambda {
                    params: ParamRange::EMPTY,
                    body: LambdaBody::Block(body),
                },
                Span::DUMMY,
            ))
        }

        /// Run the pass over a module whose single function's body is one
        /// expression statement holding `root`.
        fn run(&mut self, root: ExprId) {
            let stmt = self
                .arena
                .alloc_stmt(Stmt::new(StmtKind::Expr(root), Span::DUMMY));
            let stmts = self.arena.alloc_stmt_list([stmt]);
            let body = self.arena.alloc_block(Block::new(stmts, Span::DUMMY));
            let mut module = Module::new();
            module.functions.push(Function {
                name: self.interner.intern("screen"),
                params: ParamRange::EMPTY,
                body,
                is_constructor: false,
                span: Span::DUMMY,
            });

            let names = WellKnown::intern(&mut self.interner);
            let mut pass = CallSiteInstrumenter::new(&self.interner, names);
            pass.run(&mut self.arena, &mut module).unwrap();
        }

        fn args_of(&self, call: ExprId) -> Vec<ExprId> {
            let ExprKind::Call { args, .. } = self.arena.expr(call).kind else {
                panic!("expected call, got {:?}", self.arena.expr(call).kind);
            };
            self.arena.expr_list(args).to_vec()
        }

        fn assert_composer_ref(&self, arg: ExprId) {
            let ExprKind::Ident(name) = self.arena.expr(arg).kind else {
                panic!("expected $composer reference");
            };
            assert_eq!(self.interner.lookup(name), "$composer");
        }
    }

    #[test]
    fn zero_argument_call_gains_composer_and_one_empty_mask() {
        let mut fx = Fixture::new();
        let call = fx.call("Spacer", &[]);
        fx.run(call);

        let args = fx.args_of(call);
        assert_eq!(args.len(), 2);
        fx.assert_composer_ref(args[0]);
        assert_eq!(fx.arena.expr(args[1]).kind, ExprKind::Int(0));
    }

    #[test]
    fn string_literal_argument_masks_to_one() {
        let mut fx = Fixture::new();
        let text = fx.str_lit("hello");
        let call = fx.call("Text", &[text]);
        fx.run(call);

        let args = fx.args_of(call);
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], text);
        fx.assert_composer_ref(args[1]);
        assert_eq!(fx.arena.expr(args[2]).kind, ExprKind::Int(1));
    }

    #[test]
    fn lambda_argument_masks_to_zero() {
        let mut fx = Fixture::new();
        let content = fx.lambda();
        let call = fx.call("Column", &[content]);
        fx.run(call);

        let args = fx.args_of(call);
        assert_eq!(args.len(), 3);
        assert_eq!(fx.arena.expr(args[2]).kind, ExprKind::Int(0));
    }

    #[test]
    fn mixed_argument_kinds_pack_into_slots() {
        let mut fx = Fixture::new();
        let title = fx.str_lit("title");
        let content = fx.lambda();
        let count = fx
            .arena
            .alloc_expr(Expr::new(ExprKind::Int(3), Span::DUMMY));
        let call = fx.call("Row", &[title, content, count]);
        fx.run(call);

        let args = fx.args_of(call);
        assert_eq!(args.len(), 5);
        // slot0 stable, slot1 unstable, slot2 stable → 0b001_000_001
        assert_eq!(fx.arena.expr(args[4]).kind, ExprKind::Int(65));
    }

    #[test]
    fn eleven_arguments_chain_a_second_mask() {
        let mut fx = Fixture::new();
        let args: Vec<ExprId> = (0..11).map(|_| fx.str_lit("x")).collect();
        let call = fx.call("Grid", &args);
        fx.run(call);

        let new_args = fx.args_of(call);
        // 11 originals + composer + two masks
        assert_eq!(new_args.len(), 14);
        fx.assert_composer_ref(new_args[11]);
        // First chunk: ten stable slots; second chunk: one.
        let mut first = 0i64;
        for slot in 0..10 {
            first |= 1 << (slot * 3);
        }
        assert_eq!(fx.arena.expr(new_args[12]).kind, ExprKind::Int(first));
        assert_eq!(fx.arena.expr(new_args[13]).kind, ExprKind::Int(1));
    }

    #[test]
    fn lowercase_and_method_calls_are_untouched() {
        let mut fx = Fixture::new();
        let free = fx.call("print", &[]);
        fx.run(free);
        assert!(fx.args_of(free).is_empty());

        // $composer.startReplaceableGroup(1) — field callee, never eligible.
        let recv_name = fx.interner.intern("$composer");
        let method = fx.interner.intern("startReplaceableGroup");
        let receiver = fx
            .arena
            .alloc_expr(Expr::new(ExprKind::Ident(recv_name), Span::DUMMY));
        let callee = fx.arena.alloc_expr(Expr::new(
            ExprKind::Field {
                receiver,
                field: method,
            },
            Span::DUMMY,
        ));
        let one = fx
            .arena
            .alloc_expr(Expr::new(ExprKind::Int(1), Span::DUMMY));
        let arg_range = fx.arena.alloc_expr_list([one]);
        let call = fx.arena.alloc_expr(Expr::new(
            ExprKind::Call {
                callee,
                args: arg_range,
            },
            Span::DUMMY,
        ));
        fx.run(call);
        assert_eq!(fx.args_of(call), vec![one]);
    }

    #[test]
    fn calls_nested_inside_lambda_arguments_are_instrumented() {
        let mut fx = Fixture::new();

        // Column({ Text("hi"); })
        let hi = fx.str_lit("hi");
        let inner = fx.call("Text", &[hi]);
        let inner_stmt = fx
            .arena
            .alloc_stmt(Stmt::new(StmtKind::Expr(inner), Span::DUMMY));
        let inner_stmts = fx.arena.alloc_stmt_list([inner_stmt]);
        let body = fx.arena.alloc_block(Block::new(inner_stmts, Span::DUMMY));
        let lambda = fx.arena.alloc_expr(Expr::new(
            ExprKind::Lambda {
                params: ParamRange::EMPTY,
                body: LambdaBody::Block(body),
            },
            Span::DUMMY,
        ));
        let outer = fx.call("Column", &[lambda]);
        fx.run(outer);

        // Outer: lambda arg → mask 0.
        let outer_args = fx.args_of(outer);
        assert_eq!(outer_args.len(), 3);
        assert_eq!(fx.arena.expr(outer_args[2]).kind, ExprKind::Int(0));

        // Inner: string literal arg → mask 1.
        let inner_args = fx.args_of(inner);
        assert_eq!(inner_args.len(), 3);
        assert_eq!(fx.arena.expr(inner_args[2]).kind, ExprKind::Int(1));
    }
}
