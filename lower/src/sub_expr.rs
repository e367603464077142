//! Variable-filtered sub-expressions.
//!
//! The part of an expression that still depends on a set of index variables, i.e.
//! what remains to be computed inside the loops over those variables.

use std::collections::BTreeSet;

use tacit_ir::rewrite::rebuild_binary;
use tacit_ir::{AccessNode, BinaryOp, ExprRef, ExprRewriter, Immediate, IndexExpr, IndexVar, UnaryOp};

struct SubExpr<'a> {
    vars: BTreeSet<&'a IndexVar>,
}

impl ExprRewriter for SubExpr<'_> {
    fn rewrite_access(&mut self, node: &ExprRef, access: &AccessNode) -> IndexExpr {
        if access.index_vars().iter().any(|var| self.vars.contains(var)) { node.into() } else { IndexExpr::undefined() }
    }

    /// A kept unary node is returned whole, its operand unfiltered.
    fn rewrite_unary(&mut self, node: &ExprRef, _op: UnaryOp, a: &ExprRef) -> IndexExpr {
        if self.rewrite_node(a).defined() { node.into() } else { IndexExpr::undefined() }
    }

    fn rewrite_binary(&mut self, node: &ExprRef, op: BinaryOp, a: &ExprRef, b: &ExprRef) -> IndexExpr {
        let new_a = self.rewrite_node(a);
        let new_b = self.rewrite_node(b);
        match (new_a.defined(), new_b.defined()) {
            (true, true) => rebuild_binary(node, op, (a, new_a), (b, new_b)),
            (true, false) => new_a,
            (false, true) => new_b,
            (false, false) => IndexExpr::undefined(),
        }
    }

    fn rewrite_immediate(&mut self, _node: &ExprRef, _imm: &Immediate) -> IndexExpr {
        IndexExpr::undefined()
    }
}

/// Sub-expression of `expr` that depends on at least one variable in `vars`.
///
/// * An access is kept iff it uses a variable in `vars`.
/// * A unary node is kept iff its operand keeps something, and is then returned
///   as the original node.
/// * A binary node whose operands both keep something combines the filtered
///   operands; if only one does, that filtered operand replaces the node.
/// * Immediates depend on nothing and are dropped.
///
/// Returns undefined when nothing depends on `vars`. Sub-trees that are kept
/// entirely are returned as the original nodes.
#[tracing::instrument(skip_all, fields(expr = %expr))]
pub fn get_sub_expr(expr: &IndexExpr, vars: &[IndexVar]) -> IndexExpr {
    let sub_expr = SubExpr { vars: vars.iter().collect() }.rewrite(expr);
    tracing::debug!(sub_expr = %sub_expr, "filtered sub-expression");
    sub_expr
}
