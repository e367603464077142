//! Scheduling annotations attached to expression nodes.
//!
//! An [`OperatorSplit`] records that one index variable is split into two at a
//! given node. Splits live on the nodes themselves (see
//! [`IndexExpr::split_operator`]); a tensor's [`Schedule`] is recomputed from its
//! bound expression on every request.

use std::fmt;

use crate::expr::{BinaryOp, ExprRef, IndexExpr};
use crate::index_var::IndexVar;
use crate::visit::ExprVisitor;

/// Split of `old` into `left` and `right` at node `expr_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatorSplit {
    expr_id: u64,
    old: IndexVar,
    left: IndexVar,
    right: IndexVar,
}

impl OperatorSplit {
    pub fn new(expr_id: u64, old: IndexVar, left: IndexVar, right: IndexVar) -> Self {
        Self { expr_id, old, left, right }
    }

    /// Id of the annotated node.
    pub fn expr_id(&self) -> u64 {
        self.expr_id
    }

    pub fn old(&self) -> &IndexVar {
        &self.old
    }

    pub fn left(&self) -> &IndexVar {
        &self.left
    }

    pub fn right(&self) -> &IndexVar {
        &self.right
    }
}

impl fmt::Display for OperatorSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "split({} -> {}, {}) @ node {}", self.old, self.left, self.right, self.expr_id)
    }
}

/// Scheduling annotations of one tensor computation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    operator_splits: Vec<OperatorSplit>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the splits of every binary node in `expr`, in traversal order.
    ///
    /// Nested binary nodes contribute too, not only the outermost ones.
    pub fn from_expr(expr: &IndexExpr) -> Self {
        let mut collector = SplitCollector::default();
        collector.visit_expr(expr);
        Self { operator_splits: collector.splits }
    }

    pub fn operator_splits(&self) -> &[OperatorSplit] {
        &self.operator_splits
    }

    pub fn add_operator_split(&mut self, split: OperatorSplit) {
        self.operator_splits.push(split);
    }

    pub fn clear_operator_splits(&mut self) {
        self.operator_splits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.operator_splits.is_empty()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator_splits.is_empty() {
            return f.write_str("Schedule: no operator splits");
        }
        writeln!(f, "Schedule:")?;
        for split in &self.operator_splits {
            writeln!(f, "  {split}")?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct SplitCollector {
    splits: Vec<OperatorSplit>,
}

impl ExprVisitor for SplitCollector {
    fn visit_binary(&mut self, node: &ExprRef, _op: BinaryOp, a: &ExprRef, b: &ExprRef) {
        self.splits.extend(node.operator_splits());
        self.visit(a);
        self.visit(b);
    }
}
