//! Structural equality of index expressions.

use std::rc::Rc;

use crate::expr::{ExprKind, ExprRef, IndexExpr};

/// Structural equality.
///
/// Two undefined expressions are equal; a defined and an undefined one are not.
/// Otherwise the trees must have the same shape: accesses must name the same tensor
/// entity with pairwise identical index variables, operators must match with equal
/// operands in the same order, and immediates must hold the same kind and value.
/// No algebraic canonicalization happens: `a + b` and `b + a` differ.
pub fn equals(a: &IndexExpr, b: &IndexExpr) -> bool {
    match (a.node(), b.node()) {
        (None, None) => true,
        (Some(a), Some(b)) => node_equals(a, b),
        _ => false,
    }
}

fn node_equals(a: &ExprRef, b: &ExprRef) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    match (a.kind(), b.kind()) {
        (ExprKind::Access(a), ExprKind::Access(b)) => {
            a.tensor_var() == b.tensor_var() && a.index_vars() == b.index_vars()
        }
        (ExprKind::Unary(op_a, a), ExprKind::Unary(op_b, b)) => op_a == op_b && node_equals(a, b),
        (ExprKind::Binary(op_a, a0, a1), ExprKind::Binary(op_b, b0, b1)) => {
            op_a == op_b && node_equals(a0, b0) && node_equals(a1, b1)
        }
        (ExprKind::Immediate(a), ExprKind::Immediate(b)) => a.same_value(b),
        _ => false,
    }
}
