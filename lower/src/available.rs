//! Available expressions: hoisting candidates at a loop level.
//!
//! An expression is available once every index variable its accesses use has been
//! visited by the enclosing loops. The maximal available sub-expressions can be
//! computed once into a temporary instead of inside the inner loops.

use std::collections::BTreeSet;

use tacit_ir::visit::ExprVisitor;
use tacit_ir::{AccessNode, BinaryOp, ExprRef, Immediate, IndexExpr, IndexVar, UnaryOp};

use crate::config::AvailableExprConfig;

/// Bottom-up availability tracking.
///
/// `active` holds one `(expression, available)` entry per completed operand;
/// visiting a node pops its operands' entries and pushes its own.
struct AvailableExpressions<'a> {
    visited: BTreeSet<&'a IndexVar>,
    available: Vec<IndexExpr>,
    active: Vec<(ExprRef, bool)>,
}

impl<'a> AvailableExpressions<'a> {
    fn new(visited: &'a [IndexVar]) -> Self {
        Self { visited: visited.iter().collect(), available: Vec::new(), active: Vec::new() }
    }

    fn pop(&mut self) -> (ExprRef, bool) {
        match self.active.pop() {
            Some(entry) => entry,
            None => panic!("available expression stack underflow"),
        }
    }

    fn run(mut self, root: &ExprRef) -> Vec<IndexExpr> {
        self.visit(root);
        assert_eq!(self.active.len(), 1, "available expression stack must hold exactly the root");
        let (root, available) = self.pop();
        if available {
            self.available.push(root.into());
        }
        self.available
    }
}

impl ExprVisitor for AvailableExpressions<'_> {
    fn visit_access(&mut self, node: &ExprRef, access: &AccessNode) {
        let available = access.index_vars().iter().all(|var| self.visited.contains(var));
        self.active.push((node.clone(), available));
    }

    fn visit_unary(&mut self, node: &ExprRef, _op: UnaryOp, a: &ExprRef) {
        self.visit(a);
        let (_, available) = self.pop();
        self.active.push((node.clone(), available));
    }

    fn visit_binary(&mut self, node: &ExprRef, _op: BinaryOp, a: &ExprRef, b: &ExprRef) {
        self.visit(a);
        self.visit(b);
        assert!(self.active.len() >= 2, "binary node needs two operand entries");
        let (b, b_available) = self.pop();
        let (a, a_available) = self.pop();

        if a_available && b_available {
            self.active.push((node.clone(), true));
            return;
        }
        if a_available {
            self.available.push(a.into());
        }
        if b_available {
            self.available.push(b.into());
        }
        self.active.push((node.clone(), false));
    }

    fn visit_immediate(&mut self, node: &ExprRef, _imm: &Immediate) {
        self.active.push((node.clone(), true));
    }
}

/// Maximal sub-expressions of `expr` computable once `visited_vars` are bound.
///
/// Results are ordered by traversal (left operand before right operand). Every
/// trivial expression is kept; see [`get_available_expressions_with`] to elide
/// them.
pub fn get_available_expressions(expr: &IndexExpr, visited_vars: &[IndexVar]) -> Vec<IndexExpr> {
    get_available_expressions_with(expr, visited_vars, &AvailableExprConfig::default())
}

/// [`get_available_expressions`] with an explicit configuration.
#[tracing::instrument(skip_all, fields(expr = %expr))]
pub fn get_available_expressions_with(
    expr: &IndexExpr,
    visited_vars: &[IndexVar],
    config: &AvailableExprConfig,
) -> Vec<IndexExpr> {
    let Some(root) = expr.node() else {
        return Vec::new();
    };

    let mut available = AvailableExpressions::new(visited_vars).run(root);
    let found = available.len();
    available.retain(|expr| !config.elides(expr));

    tracing::debug!(found, kept = available.len(), "available expressions");
    tracing::trace!(tree = %expr.tree(), "available expression source");
    available
}
