//! Pass ordering and the pipeline entry point.
//!
//! The five passes run strictly in sequence over one compilation unit.
//! Order is load-bearing: signature augmentation creates the parameters
//! the call-site and body passes consume, and the fixup pass must repair
//! trailing-lambda calls before anything downstream can see them as
//! ordinary calls and closures. Each pass takes exclusive access to the
//! arena for one traversal, then hands it to the next.

use weft_ir::{Module, StringInterner, TreeArena};

use crate::augment::SignatureAugmenter;
use crate::call_site::CallSiteInstrumenter;
use crate::error::PipelineError;
use crate::fixup::TrailingLambdaFixup;
use crate::group::GroupInstrumenter;
use crate::names::WellKnown;
use crate::restart::BodyRecomposer;

/// One stage of the recomposition pipeline.
pub trait RewritePass {
    /// Stable pass name, used in trace output.
    fn name(&self) -> &'static str;

    /// Run one traversal over the unit, mutating it in place.
    fn run(&mut self, arena: &mut TreeArena, module: &mut Module) -> Result<(), PipelineError>;
}

/// Run the full five-pass pipeline over one compilation unit.
///
/// Mutates the tree in place; there is no output beyond the rewritten
/// unit. The pipeline is single-application: running it twice over the
/// same unit fails with [`PipelineError::AlreadyAugmented`].
pub fn run(
    arena: &mut TreeArena,
    module: &mut Module,
    interner: &mut StringInterner,
) -> Result<(), PipelineError> {
    let names = WellKnown::intern(interner);
    let interner = &*interner;

    let mut fixup = TrailingLambdaFixup::new();
    let mut augment = SignatureAugmenter::new(interner, names);
    let mut group = GroupInstrumenter::new(interner, names);
    let mut call_site = CallSiteInstrumenter::new(interner, names);
    let mut restart = BodyRecomposer::new(interner, names);

    let passes: [&mut dyn RewritePass; 5] = [
        &mut fixup,
        &mut augment,
        &mut group,
        &mut call_site,
        &mut restart,
    ];

    for pass in passes {
        tracing::debug!(pass = pass.name(), "running recomposition pass");
        pass.run(arena, module)?;
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use weft_ir::{BlockId, Function, ParamRange, ParamRole, Span};

    #[test]
    fn empty_unit_runs_clean() {
        let mut interner = StringInterner::new();
        let mut arena = TreeArena::new();
        let mut module = Module::new();
        run(&mut arena, &mut module, &mut interner).unwrap();
    }

    #[test]
    fn second_run_over_the_same_unit_is_rejected() {
        let mut interner = StringInterner::new();
        let mut arena = TreeArena::new();
        let mut module = Module::new();
        module.functions.push(Function {
            name: interner.intern("Badge"),
            params: ParamRange::EMPTY,
            body: BlockId::INVALID,
            is_constructor: false,
            span: Span::DUMMY,
        });

        run(&mut arena, &mut module, &mut interner).unwrap();
        let err = run(&mut arena, &mut module, &mut interner).unwrap_err();
        assert!(matches!(err, PipelineError::AlreadyAugmented { .. }));
    }

    #[test]
    fn bodiless_composable_is_augmented_but_not_recomposed() {
        let mut interner = StringInterner::new();
        let mut arena = TreeArena::new();
        let mut module = Module::new();
        module.functions.push(Function {
            name: interner.intern("Forward"),
            params: ParamRange::EMPTY,
            body: BlockId::INVALID,
            is_constructor: false,
            span: Span::DUMMY,
        });

        run(&mut arena, &mut module, &mut interner).unwrap();

        let function = &module.functions[0];
        let params = arena.params(function.params);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].role, ParamRole::Composer);
        assert_eq!(params[1].role, ParamRole::Changed);
        assert!(!function.body.is_valid());
    }
}
