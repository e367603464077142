//! Bottom-up rewriting of index expressions.
//!
//! [`ExprRewriter`] mirrors [`crate::visit::ExprVisitor`]: per-kind methods fall
//! back to category methods, and [`dispatch`] is the single exhaustive match over
//! node kinds. The default unary and binary rewrites rewrite the operands first and
//! then call [`rebuild_unary`] / [`rebuild_binary`], which return the original
//! node when no operand changed (pointer identity) and build a fresh node
//! otherwise. A node cannot hold an undefined operand, so an operand that rewrites
//! to undefined makes the default rebuild undefined as well.
//!
//! Rewriters that need other semantics for undefined operands (see [`simplify`])
//! override the category methods and decide themselves.

pub mod simplify;

use std::rc::Rc;

pub use simplify::simplify;

use crate::expr::{AccessNode, BinaryOp, Complex, ExprKind, ExprNode, ExprRef, Immediate, IndexExpr, UnaryOp};

pub trait ExprRewriter {
    /// Rewrite an expression handle. Undefined stays undefined.
    fn rewrite(&mut self, expr: &IndexExpr) -> IndexExpr {
        match expr.node() {
            Some(node) => self.rewrite_node(node),
            None => IndexExpr::undefined(),
        }
    }

    /// Rewrite a node through [`dispatch`].
    fn rewrite_node(&mut self, node: &ExprRef) -> IndexExpr {
        dispatch(self, node)
    }

    fn rewrite_access(&mut self, node: &ExprRef, _access: &AccessNode) -> IndexExpr {
        node.into()
    }

    fn rewrite_neg(&mut self, node: &ExprRef, a: &ExprRef) -> IndexExpr {
        self.rewrite_unary(node, UnaryOp::Neg, a)
    }

    fn rewrite_sqrt(&mut self, node: &ExprRef, a: &ExprRef) -> IndexExpr {
        self.rewrite_unary(node, UnaryOp::Sqrt, a)
    }

    fn rewrite_unary(&mut self, node: &ExprRef, op: UnaryOp, a: &ExprRef) -> IndexExpr {
        let new_a = self.rewrite_node(a);
        rebuild_unary(node, op, a, new_a)
    }

    fn rewrite_add(&mut self, node: &ExprRef, a: &ExprRef, b: &ExprRef) -> IndexExpr {
        self.rewrite_binary(node, BinaryOp::Add, a, b)
    }

    fn rewrite_sub(&mut self, node: &ExprRef, a: &ExprRef, b: &ExprRef) -> IndexExpr {
        self.rewrite_binary(node, BinaryOp::Sub, a, b)
    }

    fn rewrite_mul(&mut self, node: &ExprRef, a: &ExprRef, b: &ExprRef) -> IndexExpr {
        self.rewrite_binary(node, BinaryOp::Mul, a, b)
    }

    fn rewrite_div(&mut self, node: &ExprRef, a: &ExprRef, b: &ExprRef) -> IndexExpr {
        self.rewrite_binary(node, BinaryOp::Div, a, b)
    }

    fn rewrite_binary(&mut self, node: &ExprRef, op: BinaryOp, a: &ExprRef, b: &ExprRef) -> IndexExpr {
        let new_a = self.rewrite_node(a);
        let new_b = self.rewrite_node(b);
        rebuild_binary(node, op, (a, new_a), (b, new_b))
    }

    fn rewrite_int(&mut self, node: &ExprRef, value: i64) -> IndexExpr {
        self.rewrite_immediate(node, &Immediate::Int(value))
    }

    fn rewrite_uint(&mut self, node: &ExprRef, value: u64) -> IndexExpr {
        self.rewrite_immediate(node, &Immediate::UInt(value))
    }

    fn rewrite_float(&mut self, node: &ExprRef, value: f64) -> IndexExpr {
        self.rewrite_immediate(node, &Immediate::Float(value))
    }

    fn rewrite_complex(&mut self, node: &ExprRef, value: Complex) -> IndexExpr {
        self.rewrite_immediate(node, &Immediate::Complex(value))
    }

    fn rewrite_immediate(&mut self, node: &ExprRef, _imm: &Immediate) -> IndexExpr {
        node.into()
    }
}

/// Route `node` to the most specific rewriter method for its kind.
pub fn dispatch<R: ExprRewriter + ?Sized>(rewriter: &mut R, node: &ExprRef) -> IndexExpr {
    match node.kind() {
        ExprKind::Access(access) => rewriter.rewrite_access(node, access),
        ExprKind::Unary(UnaryOp::Neg, a) => rewriter.rewrite_neg(node, a),
        ExprKind::Unary(UnaryOp::Sqrt, a) => rewriter.rewrite_sqrt(node, a),
        ExprKind::Binary(BinaryOp::Add, a, b) => rewriter.rewrite_add(node, a, b),
        ExprKind::Binary(BinaryOp::Sub, a, b) => rewriter.rewrite_sub(node, a, b),
        ExprKind::Binary(BinaryOp::Mul, a, b) => rewriter.rewrite_mul(node, a, b),
        ExprKind::Binary(BinaryOp::Div, a, b) => rewriter.rewrite_div(node, a, b),
        ExprKind::Immediate(Immediate::Int(v)) => rewriter.rewrite_int(node, *v),
        ExprKind::Immediate(Immediate::UInt(v)) => rewriter.rewrite_uint(node, *v),
        ExprKind::Immediate(Immediate::Float(v)) => rewriter.rewrite_float(node, *v),
        ExprKind::Immediate(Immediate::Complex(v)) => rewriter.rewrite_complex(node, *v),
    }
}

/// Rebuild a unary node from its rewritten operand.
///
/// Returns `node` itself when `new_a` is `a`, undefined when `new_a` is undefined.
pub fn rebuild_unary(node: &ExprRef, op: UnaryOp, a: &ExprRef, new_a: IndexExpr) -> IndexExpr {
    match new_a.into_node() {
        None => IndexExpr::undefined(),
        Some(new_a) if Rc::ptr_eq(&new_a, a) => node.into(),
        Some(new_a) => ExprNode::unary(op, new_a).into(),
    }
}

/// Rebuild a binary node from its rewritten operands, each given as
/// `(original, rewritten)`.
///
/// Returns `node` itself when neither operand changed, undefined when either
/// rewritten operand is undefined.
pub fn rebuild_binary(
    node: &ExprRef,
    op: BinaryOp,
    (a, new_a): (&ExprRef, IndexExpr),
    (b, new_b): (&ExprRef, IndexExpr),
) -> IndexExpr {
    match (new_a.into_node(), new_b.into_node()) {
        (Some(new_a), Some(new_b)) if Rc::ptr_eq(&new_a, a) && Rc::ptr_eq(&new_b, b) => node.into(),
        (Some(new_a), Some(new_b)) => ExprNode::binary(op, new_a, new_b).into(),
        _ => IndexExpr::undefined(),
    }
}
