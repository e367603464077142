//! Tree visualization for index expressions.
//!
//! Provides pretty-printing of expression trees as ASCII trees.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::rc::Rc;

use itertools::Itertools;
use ptree::{Style, TreeItem};

use super::{ExprKind, ExprRef, IndexExpr};

/// Compact renderer: a node shared by several parents is expanded once and shown
/// as `[id] → (see above)` afterwards.
#[derive(Clone)]
pub struct ExprTreeCompact {
    node: ExprRef,
    visited: Rc<RefCell<HashSet<u64>>>,
    /// True if this node was already visited when write_self was called
    is_backref: RefCell<bool>,
}

impl ExprTreeCompact {
    pub fn new(node: &ExprRef) -> Self {
        Self { node: node.clone(), visited: Rc::default(), is_backref: RefCell::new(false) }
    }

    fn from_child(node: ExprRef, visited: Rc<RefCell<HashSet<u64>>>) -> Self {
        Self { node, visited, is_backref: RefCell::new(false) }
    }
}

impl TreeItem for ExprTreeCompact {
    type Child = ExprTreeCompact;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        let mut visited = self.visited.borrow_mut();
        if visited.contains(&self.node.id) {
            *self.is_backref.borrow_mut() = true;
            write!(f, "[{}] → (see above)", self.node.id)
        } else {
            visited.insert(self.node.id);
            write!(f, "{}", format_node(&self.node))
        }
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        if *self.is_backref.borrow() {
            return Cow::Borrowed(&[]);
        }
        let children = self
            .node
            .children()
            .into_iter()
            .map(|child| ExprTreeCompact::from_child(child.clone(), self.visited.clone()))
            .collect();
        Cow::Owned(children)
    }
}

/// Full renderer: shared nodes are expanded at every occurrence.
#[derive(Clone)]
pub struct ExprTreeFull {
    node: ExprRef,
}

impl TreeItem for ExprTreeFull {
    type Child = ExprTreeFull;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        write!(f, "{}", format_node(&self.node))
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Owned(self.node.children().into_iter().map(|child| ExprTreeFull { node: child.clone() }).collect())
    }
}

/// Output format: `[id] KIND : dtype`, with split annotations when present.
fn format_node(node: &ExprRef) -> String {
    let kind = match node.kind() {
        ExprKind::Access(access) => {
            format!("ACCESS {}({})", access.tensor_var().name(), access.index_vars().iter().join(","))
        }
        ExprKind::Unary(op, _) => op.to_string(),
        ExprKind::Binary(op, ..) => op.to_string(),
        ExprKind::Immediate(imm) => format!("IMM({imm})"),
    };
    let splits = node.operator_splits();
    if splits.is_empty() {
        format!("[{}] {} : {}", node.id, kind, node.dtype())
    } else {
        format!("[{}] {} : {} splits=[{}]", node.id, kind, node.dtype(), splits.iter().join(", "))
    }
}

fn render<T: TreeItem>(tree: &T) -> String {
    let mut buf = Vec::new();
    match ptree::write_tree(tree, &mut buf) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(err) => format!("<tree rendering failed: {err}>"),
    }
}

impl IndexExpr {
    /// Render as a compact ASCII tree (shared nodes shown as back-references).
    pub fn tree(&self) -> String {
        match self.node() {
            Some(node) => render(&ExprTreeCompact::new(node)),
            None => "undefined".to_string(),
        }
    }

    /// Render as a full ASCII tree, expanding shared nodes at every occurrence.
    pub fn tree_full(&self) -> String {
        match self.node() {
            Some(node) => render(&ExprTreeFull { node: node.clone() }),
            None => "undefined".to_string(),
        }
    }
}
