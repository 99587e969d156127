//! Implicit-parameter injection.
//!
//! Every composable declaration gains two trailing parameters: the
//! composition-context reference the emitted runtime calls go through, and
//! the packed change mask the callee's skip guard reads. Appending keeps
//! user parameters at their original positions, so call-site argument
//! order survives unchanged.
//!
//! The appended parameters are tagged `ParamRole::Composer` and
//! `ParamRole::Changed`; the body recomposition stage finds them by role.
//! Because the roles double as the "already augmented" marker, running
//! this pass twice on the same declaration is detected and rejected
//! instead of silently double-appending.

use weft_ir::{Function, Module, Param, ParamRole, Span, StringInterner, TreeArena, TypeRef};

use crate::error::PipelineError;
use crate::names::{is_composable_decl, WellKnown};
use crate::pipeline::RewritePass;

/// Appends the implicit `$composer`/`$changed` parameters to every
/// composable declaration.
pub struct SignatureAugmenter<'a> {
    interner: &'a StringInterner,
    names: WellKnown,
    augmented: usize,
}

impl<'a> SignatureAugmenter<'a> {
    pub fn new(interner: &'a StringInterner, names: WellKnown) -> Self {
        SignatureAugmenter {
            interner,
            names,
            augmented: 0,
        }
    }

    fn augment(
        &mut self,
        arena: &mut TreeArena,
        function: &mut Function,
    ) -> Result<(), PipelineError> {
        if arena
            .params(function.params)
            .iter()
            .any(|p| p.role != ParamRole::User)
        {
            return Err(PipelineError::AlreadyAugmented {
                function: self.interner.lookup(function.name).to_owned(),
            });
        }

        let user = arena.params(function.params).to_vec();
        let composer = Param {
            name: self.names.composer_param,
            ty: TypeRef::Named(self.names.composer_ty),
            role: ParamRole::Composer,
            span: Span::DUMMY,
        };
        let changed = Param {
            name: self.names.changed_param,
            ty: TypeRef::Int,
            role: ParamRole::Changed,
            span: Span::DUMMY,
        };
        function.params = arena.alloc_params(user.into_iter().chain([composer, changed]));
        self.augmented += 1;
        Ok(())
    }
}

impl RewritePass for SignatureAugmenter<'_> {
    fn name(&self) -> &'static str {
        "signature-augmentation"
    }

    fn run(&mut self, arena: &mut TreeArena, module: &mut Module) -> Result<(), PipelineError> {
        for function in &mut module.functions {
            if is_composable_decl(self.interner, function) {
                self.augment(arena, function)?;
            }
        }
        tracing::debug!(augmented = self.augmented, "composable signatures augmented");
        Ok(())
    }
}
