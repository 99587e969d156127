//! Statement node, variants, and blocks.

use std::fmt;

use crate::{BlockId, ExprId, Name, Span, StmtRange, TypeRef};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Expression statement
    Expr(ExprId),

    /// Local variable declaration: name: ty = init
    ///
    /// `init` is `ExprId::INVALID` for an uninitialized declaration.
    Local {
        name: Name,
        ty: TypeRef,
        init: ExprId,
    },

    /// Conditional: if cond { then } else { else }
    ///
    /// `else_block` is `BlockId::INVALID` when there is no else branch.
    If {
        cond: ExprId,
        then_block: BlockId,
        else_block: BlockId,
    },

    /// Nested statement block. The front-end produces these adjacent to
    /// error nodes when trailing-lambda sugar fails to parse.
    Block(BlockId),
}

/// Statement block.
///
/// Statements are a range into the arena's flattened statement-list pool.
/// Rewrites that change a block's contents allocate a fresh range and
/// update `stmts`; untouched blocks keep their original range identity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Block {
    pub stmts: StmtRange,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: StmtRange, span: Span) -> Self {
        Block { stmts, span }
    }
}
