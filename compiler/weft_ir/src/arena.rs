//! Arena allocation for syntax tree nodes.
//!
//! One `TreeArena` holds every node of a compilation unit in contiguous
//! arrays, addressed by `ExprId`/`StmtId`/`BlockId`. Lists live in
//! flattened pools addressed by ranges. The arena only ever grows: a
//! rewrite allocates replacement nodes (or a replacement range) and
//! updates the parent's child slot, leaving the old nodes orphaned until
//! the whole unit is dropped.

use crate::ast::{Block, Expr, Param, Stmt};
use crate::{BlockId, ExprId, ExprRange, ParamRange, StmtId, StmtRange};

/// Arena for one compilation unit's syntax tree.
#[derive(Default)]
pub struct TreeArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    blocks: Vec<Block>,
    params: Vec<Param>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    // Allocation

    /// Allocate an expression, returning its ID.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(index_u32(self.exprs.len(), "expression"));
        self.exprs.push(expr);
        id
    }

    /// Allocate a statement, returning its ID.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(index_u32(self.stmts.len(), "statement"));
        self.stmts.push(stmt);
        id
    }

    /// Allocate a block, returning its ID.
    pub fn alloc_block(&mut self, block: Block) -> BlockId {
        let id = BlockId::new(index_u32(self.blocks.len(), "block"));
        self.blocks.push(block);
        id
    }

    /// Allocate an expression list in the flattened pool.
    pub fn alloc_expr_list<I>(&mut self, ids: I) -> ExprRange
    where
        I: IntoIterator<Item = ExprId>,
    {
        let start = index_u32(self.expr_lists.len(), "expression list");
        self.expr_lists.extend(ids);
        let len = range_len(self.expr_lists.len() - start as usize);
        ExprRange::new(start, len)
    }

    /// Allocate a statement list in the flattened pool.
    pub fn alloc_stmt_list<I>(&mut self, ids: I) -> StmtRange
    where
        I: IntoIterator<Item = StmtId>,
    {
        let start = index_u32(self.stmt_lists.len(), "statement list");
        self.stmt_lists.extend(ids);
        let len = range_len(self.stmt_lists.len() - start as usize);
        StmtRange::new(start, len)
    }

    /// Allocate a parameter list in the flattened pool.
    pub fn alloc_params<I>(&mut self, params: I) -> ParamRange
    where
        I: IntoIterator<Item = Param>,
    {
        let start = index_u32(self.params.len(), "parameter list");
        self.params.extend(params);
        let len = range_len(self.params.len() - start as usize);
        ParamRange::new(start, len)
    }

    // Access

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn stmt_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id.index()]
    }

    #[inline]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    #[inline]
    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }

    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.start as usize..range.start as usize + range.len()]
    }

    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.start as usize..range.start as usize + range.len()]
    }

    #[inline]
    pub fn params(&self, range: ParamRange) -> &[Param] {
        &self.params[range.start as usize..range.start as usize + range.len()]
    }
}

#[inline]
fn index_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena exceeded u32 capacity for {what}"))
}

#[inline]
fn range_len(len: usize) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("list of {len} elements exceeds range capacity"))
}
