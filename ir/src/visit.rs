//! Read-only traversal of index expressions.
//!
//! [`ExprVisitor`] has one method per node kind plus one per category (unary,
//! binary, immediate). Per-kind methods default to their category method, and the
//! category methods default to visiting the operands left to right. A visitor
//! overrides whichever level it needs; an override decides on its own whether and
//! in which order to recurse, which lets bottom-up accumulations control their
//! traversal.
//!
//! [`dispatch`] is the single place that maps a node kind to a visitor method.

use crate::expr::{AccessNode, BinaryOp, Complex, ExprKind, ExprRef, Immediate, IndexExpr, UnaryOp};

pub trait ExprVisitor {
    /// Visit a node through [`dispatch`].
    fn visit(&mut self, node: &ExprRef) {
        dispatch(self, node);
    }

    /// Visit an expression handle; undefined expressions are skipped.
    fn visit_expr(&mut self, expr: &IndexExpr) {
        if let Some(node) = expr.node() {
            self.visit(node);
        }
    }

    fn visit_access(&mut self, _node: &ExprRef, _access: &AccessNode) {}

    fn visit_neg(&mut self, node: &ExprRef, a: &ExprRef) {
        self.visit_unary(node, UnaryOp::Neg, a);
    }

    fn visit_sqrt(&mut self, node: &ExprRef, a: &ExprRef) {
        self.visit_unary(node, UnaryOp::Sqrt, a);
    }

    fn visit_unary(&mut self, _node: &ExprRef, _op: UnaryOp, a: &ExprRef) {
        self.visit(a);
    }

    fn visit_add(&mut self, node: &ExprRef, a: &ExprRef, b: &ExprRef) {
        self.visit_binary(node, BinaryOp::Add, a, b);
    }

    fn visit_sub(&mut self, node: &ExprRef, a: &ExprRef, b: &ExprRef) {
        self.visit_binary(node, BinaryOp::Sub, a, b);
    }

    fn visit_mul(&mut self, node: &ExprRef, a: &ExprRef, b: &ExprRef) {
        self.visit_binary(node, BinaryOp::Mul, a, b);
    }

    fn visit_div(&mut self, node: &ExprRef, a: &ExprRef, b: &ExprRef) {
        self.visit_binary(node, BinaryOp::Div, a, b);
    }

    fn visit_binary(&mut self, _node: &ExprRef, _op: BinaryOp, a: &ExprRef, b: &ExprRef) {
        self.visit(a);
        self.visit(b);
    }

    fn visit_int(&mut self, node: &ExprRef, value: i64) {
        self.visit_immediate(node, &Immediate::Int(value));
    }

    fn visit_uint(&mut self, node: &ExprRef, value: u64) {
        self.visit_immediate(node, &Immediate::UInt(value));
    }

    fn visit_float(&mut self, node: &ExprRef, value: f64) {
        self.visit_immediate(node, &Immediate::Float(value));
    }

    fn visit_complex(&mut self, node: &ExprRef, value: Complex) {
        self.visit_immediate(node, &Immediate::Complex(value));
    }

    fn visit_immediate(&mut self, _node: &ExprRef, _imm: &Immediate) {}
}

/// Route `node` to the most specific visitor method for its kind.
pub fn dispatch<V: ExprVisitor + ?Sized>(visitor: &mut V, node: &ExprRef) {
    match node.kind() {
        ExprKind::Access(access) => visitor.visit_access(node, access),
        ExprKind::Unary(UnaryOp::Neg, a) => visitor.visit_neg(node, a),
        ExprKind::Unary(UnaryOp::Sqrt, a) => visitor.visit_sqrt(node, a),
        ExprKind::Binary(BinaryOp::Add, a, b) => visitor.visit_add(node, a, b),
        ExprKind::Binary(BinaryOp::Sub, a, b) => visitor.visit_sub(node, a, b),
        ExprKind::Binary(BinaryOp::Mul, a, b) => visitor.visit_mul(node, a, b),
        ExprKind::Binary(BinaryOp::Div, a, b) => visitor.visit_div(node, a, b),
        ExprKind::Immediate(Immediate::Int(v)) => visitor.visit_int(node, *v),
        ExprKind::Immediate(Immediate::UInt(v)) => visitor.visit_uint(node, *v),
        ExprKind::Immediate(Immediate::Float(v)) => visitor.visit_float(node, *v),
        ExprKind::Immediate(Immediate::Complex(v)) => visitor.visit_complex(node, *v),
    }
}

/// Visitor calling a closure on every access node, in traversal order.
struct AccessMatcher<F> {
    f: F,
}

impl<F: FnMut(&ExprRef, &AccessNode)> ExprVisitor for AccessMatcher<F> {
    fn visit_access(&mut self, node: &ExprRef, access: &AccessNode) {
        (self.f)(node, access);
    }
}

/// Call `f` for every access node reachable from `expr`, left to right.
///
/// A node shared by several parents is reported once per occurrence.
pub fn match_accesses(expr: &IndexExpr, f: impl FnMut(&ExprRef, &AccessNode)) {
    AccessMatcher { f }.visit_expr(expr);
}
