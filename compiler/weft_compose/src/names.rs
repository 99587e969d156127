//! The fixed identifiers of the recomposition protocol.
//!
//! Two name families live here. The synthetic identifiers
//! (`$composer`, `$changed`, `$scope`) appear in emitted declarations and
//! references; the `$` prefix keeps them out of the user's namespace. The
//! runtime operation names (`startRestartGroup`, `getSkipping`, ...) are a
//! load-bearing contract with the composition runtime the emitted code
//! links against — renaming any of them breaks the next compilation stage.
//!
//! Passes never *decide* anything by comparing these strings: the implicit
//! parameters are located by their `ParamRole` tag. The names exist purely
//! so the emitted tree prints and resolves correctly downstream.

use weft_ir::{Function, Name, StringInterner};

/// Pre-interned protocol names, built once per pipeline run and shared by
/// every pass that emits code.
#[derive(Copy, Clone)]
pub struct WellKnown {
    /// Implicit composition-context parameter: `$composer`.
    pub composer_param: Name,
    /// Implicit change-mask parameter: `$changed`.
    pub changed_param: Name,
    /// Generated restart-scope local: `$scope`.
    pub scope_local: Name,
    /// Composition-context type: `Composer`.
    pub composer_ty: Name,
    /// Restart-scope handle type: `Scope`.
    pub scope_ty: Name,
    /// Restart closure's own composer parameter: `c`.
    pub restart_composer: Name,
    /// Restart closure's unused change-mask parameter: `i`.
    pub restart_changed: Name,
    // Runtime operations
    pub start_restart_group: Name,
    pub end_restart_group: Name,
    pub get_skipping: Name,
    pub skip_to_group_end: Name,
    pub start_replaceable_group: Name,
    pub end_replaceable_group: Name,
    pub update_scope: Name,
}

impl WellKnown {
    /// Intern the full protocol name set.
    pub fn intern(interner: &mut StringInterner) -> Self {
        WellKnown {
            composer_param: interner.intern("$composer"),
            changed_param: interner.intern("$changed"),
            scope_local: interner.intern("$scope"),
            composer_ty: interner.intern("Composer"),
            scope_ty: interner.intern("Scope"),
            restart_composer: interner.intern("c"),
            restart_changed: interner.intern("i"),
            start_restart_group: interner.intern("startRestartGroup"),
            end_restart_group: interner.intern("endRestartGroup"),
            get_skipping: interner.intern("getSkipping"),
            skip_to_group_end: interner.intern("skipToGroupEnd"),
            start_replaceable_group: interner.intern("startReplaceableGroup"),
            end_replaceable_group: interner.intern("endReplaceableGroup"),
            update_scope: interner.intern("updateScope"),
        }
    }
}

/// Check whether an identifier opts into the composable convention:
/// non-empty and uppercase-initial.
#[inline]
pub(crate) fn uppercase_initial(ident: &str) -> bool {
    ident.chars().next().is_some_and(char::is_uppercase)
}

/// The composable-declaration naming rule: uppercase-initial name and not
/// a constructor. This predicate is the entire opt-in surface — no
/// annotation or type information is consulted.
#[inline]
pub(crate) fn is_composable_decl(interner: &StringInterner, function: &Function) -> bool {
    !function.is_constructor && uppercase_initial(interner.lookup(function.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_ir::{BlockId, ParamRange, Span};

    #[test]
    fn uppercase_initial_convention() {
        assert!(uppercase_initial("Column"));
        assert!(uppercase_initial("M"));
        assert!(!uppercase_initial("text"));
        assert!(!uppercase_initial(""));
        assert!(!uppercase_initial("_Hidden"));
        assert!(!uppercase_initial("1Up"));
    }

    #[test]
    fn constructors_are_never_composable() {
        let mut interner = StringInterner::new();
        let name = interner.intern("Widget");
        let ctor = Function {
            name,
            params: ParamRange::EMPTY,
            body: BlockId::INVALID,
            is_constructor: true,
            span: Span::DUMMY,
        };
        assert!(!is_composable_decl(&interner, &ctor));

        let func = Function {
            is_constructor: false,
            ..ctor
        };
        assert!(is_composable_decl(&interner, &func));
    }

    #[test]
    fn interning_twice_yields_identical_names() {
        let mut interner = StringInterner::new();
        let a = WellKnown::intern(&mut interner);
        let b = WellKnown::intern(&mut interner);
        assert_eq!(a.composer_param, b.composer_param);
        assert_eq!(a.update_scope, b.update_scope);
    }
}
