use super::{ijk, tensor};
use crate::expr::{AccessNode, BinaryOp, ExprRef, Immediate, IndexExpr, UnaryOp};
use crate::visit::{ExprVisitor, match_accesses};

/// Records the kind of every node in visiting order.
#[derive(Default)]
struct Trace(Vec<String>);

impl ExprVisitor for Trace {
    fn visit_access(&mut self, _node: &ExprRef, access: &AccessNode) {
        self.0.push(access.tensor_var().name().to_string());
    }

    fn visit_unary(&mut self, _node: &ExprRef, op: UnaryOp, a: &ExprRef) {
        self.0.push(op.to_string());
        self.visit(a);
    }

    fn visit_binary(&mut self, _node: &ExprRef, op: BinaryOp, a: &ExprRef, b: &ExprRef) {
        self.0.push(op.to_string());
        self.visit(a);
        self.visit(b);
    }

    fn visit_immediate(&mut self, _node: &ExprRef, imm: &Immediate) {
        self.0.push(imm.to_string());
    }
}

/// Overrides a per-kind method without recursing.
#[derive(Default)]
struct StopAtMul {
    accesses: usize,
    muls: usize,
}

impl ExprVisitor for StopAtMul {
    fn visit_access(&mut self, _node: &ExprRef, _access: &AccessNode) {
        self.accesses += 1;
    }

    fn visit_mul(&mut self, _node: &ExprRef, _a: &ExprRef, _b: &ExprRef) {
        self.muls += 1;
    }
}

#[test]
fn test_visit_order_is_preorder_left_to_right() {
    let (i, _, _) = ijk();
    let a = tensor("A", &[4]).access([&i]).unwrap();
    let b = tensor("B", &[4]).access([&i]).unwrap();
    let expr = -(&a * &b) + IndexExpr::uint(2).sqrt();

    let mut trace = Trace::default();
    trace.visit_expr(&expr);
    assert_eq!(trace.0, ["Add", "Neg", "Mul", "A", "B", "Sqrt", "2u"]);
}

#[test]
fn test_override_controls_recursion() {
    let (i, _, _) = ijk();
    let a = tensor("A", &[4]).access([&i]).unwrap();
    let b = tensor("B", &[4]).access([&i]).unwrap();
    let expr = &a * &b + &a;

    let mut visitor = StopAtMul::default();
    visitor.visit_expr(&expr);
    assert_eq!(visitor.muls, 1);
    assert_eq!(visitor.accesses, 1, "accesses under the product are not visited");
}

#[test]
fn test_undefined_is_skipped() {
    let mut trace = Trace::default();
    trace.visit_expr(&IndexExpr::undefined());
    assert!(trace.0.is_empty());
}

#[test]
fn test_match_accesses_reports_every_occurrence() {
    let a = tensor("a", &[]).access([]).unwrap();
    let b = tensor("b", &[]).access([]).unwrap();
    let expr = &a * (&b - &a);

    let mut names = Vec::new();
    match_accesses(&expr, |_, access| names.push(access.tensor_var().name().to_string()));
    assert_eq!(names, ["a", "b", "a"]);
}
