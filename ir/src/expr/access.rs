//! Tensor accesses.

use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use super::{AccessNode, ExprKind, ExprNode, ExprRef, IndexExpr};
use crate::Result;
use crate::index_var::IndexVar;
use crate::tensor::TensorVar;

/// Reference to a tensor under an index-variable tuple.
///
/// An `Access` is an expression (convert with `.into()`) and an assignment target:
/// [`Access::assign`] and [`Access::accumulate`] bind an expression to the accessed
/// tensor. Equality and hashing are by node identity, so two accesses built
/// separately from the same tensor and variables are different keys.
#[derive(Clone)]
pub struct Access(ExprRef);

impl Access {
    /// Caller guarantees `tensor.order() == index_vars.len()`.
    pub(crate) fn new(tensor: TensorVar, index_vars: SmallVec<[IndexVar; 4]>) -> Self {
        debug_assert_eq!(tensor.order(), index_vars.len());
        Self(ExprNode::new(ExprKind::Access(AccessNode { tensor, index_vars })))
    }

    /// Wrap an access node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not an access node.
    #[track_caller]
    pub fn from_node(node: ExprRef) -> Self {
        assert!(matches!(node.kind, ExprKind::Access(_)), "node {} is not an access", node.id);
        Self(node)
    }

    /// View `expr` as an access if its root is an access node.
    pub fn from_expr(expr: &IndexExpr) -> Option<Self> {
        let node = expr.node()?;
        matches!(node.kind, ExprKind::Access(_)).then(|| Self(node.clone()))
    }

    pub fn node(&self) -> &ExprRef {
        &self.0
    }

    fn data(&self) -> &AccessNode {
        match &self.0.kind {
            ExprKind::Access(access) => access,
            _ => unreachable!("access handle wraps a non-access node"),
        }
    }

    pub fn tensor_var(&self) -> &TensorVar {
        &self.data().tensor
    }

    pub fn index_vars(&self) -> &[IndexVar] {
        &self.data().index_vars
    }

    /// Bind `expr` to the accessed tensor (`A(i,j) = expr`).
    pub fn assign(&self, expr: impl Into<IndexExpr>) -> Result<()> {
        self.tensor_var().set_index_expression(self.index_vars().to_vec(), expr.into(), false)
    }

    /// Bind `expr` to the accessed tensor, accumulating into existing values
    /// (`A(i,j) += expr`).
    pub fn accumulate(&self, expr: impl Into<IndexExpr>) -> Result<()> {
        self.tensor_var().set_index_expression(self.index_vars().to_vec(), expr.into(), true)
    }
}

impl PartialEq for Access {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Access {}

impl Hash for Access {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl std::fmt::Debug for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Access(id={}, {})", self.0.id, self)
    }
}

impl From<Access> for IndexExpr {
    fn from(access: Access) -> Self {
        Self::from(access.0)
    }
}

impl From<&Access> for IndexExpr {
    fn from(access: &Access) -> Self {
        Self::from(&access.0)
    }
}
