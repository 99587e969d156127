//! Declarations: parameters, functions, modules.

use std::fmt;

use crate::{BlockId, Name, ParamRange, Span};

/// Role of a parameter in the recomposition protocol.
///
/// The augmentation pass appends the two implicit parameters and tags them
/// with their role; later passes locate them structurally by role rather
/// than comparing identifier text, so user-chosen names can never collide
/// with the synthetic ones.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ParamRole {
    /// Ordinary user-declared parameter.
    #[default]
    User,
    /// Implicit composition-context parameter.
    Composer,
    /// Implicit change-mask parameter.
    Changed,
}

/// Type annotation on a parameter or local.
///
/// The pipeline runs before semantic analysis, so types are syntactic
/// references only: a named type or the primitive integer type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeRef {
    /// Named type reference, resolved later by semantic analysis.
    Named(Name),
    /// Primitive integer type.
    Int,
}

/// Parameter in a function or lambda.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: TypeRef,
    pub role: ParamRole,
    pub span: Span,
}

impl Param {
    /// Create an ordinary user parameter.
    pub fn user(name: Name, ty: TypeRef, span: Span) -> Self {
        Param {
            name,
            ty,
            role: ParamRole::User,
            span,
        }
    }
}

/// Function declaration.
///
/// `body` is `BlockId::INVALID` for a declaration without a body.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Function {
    pub name: Name,
    pub params: ParamRange,
    pub body: BlockId,
    /// Constructors are exempt from the composable naming convention even
    /// when their name is uppercase-initial.
    pub is_constructor: bool,
    pub span: Span,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Function {{ name: {:?}, params: {:?}, body: {:?}, ctor: {} }}",
            self.name, self.params, self.body, self.is_constructor
        )
    }
}

/// A compilation unit: one source file's declarations.
///
/// `source_path` is the interned path of the originating file, or
/// `Name::EMPTY` when the unit has no backing file; group instrumentation
/// derives the unit's file-identity hash from it.
#[derive(Clone, Eq, PartialEq, Default)]
pub struct Module {
    pub source_path: Name,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Module {
            source_path: Name::EMPTY,
            functions: Vec::new(),
        }
    }

    /// Create a module backed by a source file.
    pub fn with_source_path(source_path: Name) -> Self {
        Module {
            source_path,
            functions: Vec::new(),
        }
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Module {{ source_path: {:?}, {} functions }}",
            self.source_path,
            self.functions.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_user_has_default_role() {
        let param = Param::user(Name::from_raw(1), TypeRef::Int, Span::DUMMY);
        assert_eq!(param.role, ParamRole::User);
        assert_eq!(param.role, ParamRole::default());
    }

    #[test]
    fn module_without_file_has_empty_path() {
        let module = Module::new();
        assert_eq!(module.source_path, Name::EMPTY);
        assert!(module.functions.is_empty());
    }
}
