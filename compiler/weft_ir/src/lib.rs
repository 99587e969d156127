//! Weft IR - syntax tree types for the Weft compiler
//!
//! This crate contains the data structures the rewrite pipeline operates on:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Arena-flattened syntax tree nodes (expressions, statements, blocks)
//! - The `Rewriter` traversal trait for in-place tree rewriting
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No `Box<Expr>`, use `ExprId(u32)` indices
//! - **Replace by slot update**: a pass rewrites a subtree by allocating new
//!   nodes and writing the new index into the parent's child slot; nodes are
//!   never deleted, orphans simply stay behind in the arena.
//!
//! Each syntax tree is exclusively owned by the compilation unit being
//! processed; passes take `&mut TreeArena` for the duration of one traversal.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod ids;
mod interner;
mod name;
pub mod rewrite;
mod span;

pub use arena::TreeArena;
pub use ast::{
    BinaryOp, Block, Expr, ExprKind, Function, LambdaBody, Module, Param, ParamRole, Stmt,
    StmtKind, TypeRef,
};
pub use ids::{BlockId, ExprId, ExprRange, ParamRange, StmtId, StmtRange};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
