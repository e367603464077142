//! Removal of exhausted accesses.
//!
//! Once a loop level has iterated past every nonzero of some operands, those
//! accesses contribute nothing further. [`simplify`] drops them and folds the
//! expression accordingly: additive operators keep the surviving operand,
//! multiplicative operators vanish with either operand.

use std::collections::HashSet;

use super::{ExprRewriter, rebuild_binary};
use crate::expr::{Access, AccessNode, BinaryOp, ExprRef, IndexExpr};

struct Simplifier<'a> {
    exhausted: &'a HashSet<Access>,
}

impl ExprRewriter for Simplifier<'_> {
    fn rewrite_access(&mut self, node: &ExprRef, _access: &AccessNode) -> IndexExpr {
        if self.exhausted.contains(&Access::from_node(node.clone())) { IndexExpr::undefined() } else { node.into() }
    }

    fn rewrite_binary(&mut self, node: &ExprRef, op: BinaryOp, a: &ExprRef, b: &ExprRef) -> IndexExpr {
        let new_a = self.rewrite_node(a);
        let new_b = self.rewrite_node(b);

        if op.is_disjunction() {
            match (new_a.defined(), new_b.defined()) {
                (false, false) => return IndexExpr::undefined(),
                (true, false) => return new_a,
                (false, true) => return new_b,
                (true, true) => {}
            }
        }
        rebuild_binary(node, op, (a, new_a), (b, new_b))
    }
}

/// Replace every access in `exhausted` by undefined and fold the result.
///
/// * `a + b` / `a - b`: an undefined side leaves the other side (a lone
///   subtrahend is returned as-is), both undefined gives undefined.
/// * `a * b` / `a / b`: either side undefined gives undefined.
/// * Unary nodes vanish with their operand; immediates are kept.
///
/// Unchanged sub-trees are returned as the original nodes. `exhausted` is keyed by
/// access identity, so only those exact access nodes are removed.
pub fn simplify(expr: &IndexExpr, exhausted: &HashSet<Access>) -> IndexExpr {
    let simplified = Simplifier { exhausted }.rewrite(expr);
    tracing::trace!(before = %expr, after = %simplified, exhausted = exhausted.len(), "simplified expression");
    simplified
}
