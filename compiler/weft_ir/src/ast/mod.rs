//! Flat syntax tree node types.
//!
//! All children are indices into the `TreeArena`, not boxes. The variant
//! set is deliberately closed: every traversal is an exhaustive match, so
//! adding a node kind is a compile-checked change in every pass.
//!
//! # Module Structure
//!
//! - `expr`: Expression node and variants
//! - `stmt`: Statement node, variants, and blocks
//! - `item`: Declarations (functions, parameters, modules)
//! - `operators`: Binary operators

mod expr;
mod item;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, LambdaBody};
pub use item::{Function, Module, Param, ParamRole, TypeRef};
pub use operators::BinaryOp;
pub use stmt::{Block, Stmt, StmtKind};
