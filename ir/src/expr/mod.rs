//! Index expression IR.
//!
//! An index expression is an immutable tree of [`ExprNode`]s shared through
//! reference counting: composing expressions never copies operands. The handle
//! [`IndexExpr`] is either defined (wraps a node) or undefined, and every pass
//! treats the undefined case explicitly.
//!
//! # Module Organization
//!
//! - [`access`] - [`Access`] handles, tensor references that double as assignment targets
//! - [`constructors`] - arithmetic operators and immediate constructors
//! - [`display`] - infix printing
//! - [`tree`] - ASCII tree rendering for diagnostics

pub mod access;
pub mod constructors;
pub mod display;
pub mod tree;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;
use tacit_dtype::DType;

use crate::index_var::IndexVar;
use crate::schedule::OperatorSplit;
use crate::tensor::TensorVar;

pub use access::Access;

/// Shared reference to an expression node.
pub type ExprRef = Rc<ExprNode>;

// Monotonic node IDs. Used for identity-keyed sets and operator split bookkeeping.
static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_expr_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum UnaryOp {
    Neg,
    Sqrt,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Additive operators: a missing operand leaves the other operand standing.
    ///
    /// Multiplicative operators are conjunctions instead: a missing operand removes
    /// the whole node.
    pub const fn is_disjunction(&self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

/// Complex immediate value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// Literal value stored in an immediate node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Immediate {
    Int(i64),
    UInt(u64),
    Float(f64),
    Complex(Complex),
}

impl Immediate {
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Int(_) => DType::Int64,
            Self::UInt(_) => DType::UInt64,
            Self::Float(_) => DType::Float64,
            Self::Complex(_) => DType::Complex128,
        }
    }

    /// Same kind and same stored value. Floats compare by bit pattern, so a NaN
    /// immediate equals itself.
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Complex(a), Self::Complex(b)) => {
                a.re.to_bits() == b.re.to_bits() && a.im.to_bits() == b.im.to_bits()
            }
            _ => false,
        }
    }
}

/// Payload of an access node: a tensor indexed by a tuple of index variables.
#[derive(Debug, Clone)]
pub struct AccessNode {
    pub(crate) tensor: TensorVar,
    pub(crate) index_vars: SmallVec<[IndexVar; 4]>,
}

impl AccessNode {
    pub fn tensor_var(&self) -> &TensorVar {
        &self.tensor
    }

    pub fn index_vars(&self) -> &[IndexVar] {
        &self.index_vars
    }
}

/// Node variants. The set is closed: every pass matches it exhaustively.
#[derive(Debug, Clone)]
pub enum ExprKind {
    Access(AccessNode),
    Unary(UnaryOp, ExprRef),
    Binary(BinaryOp, ExprRef, ExprRef),
    Immediate(Immediate),
}

/// Expression tree node.
///
/// Nodes are immutable apart from the append-only list of operator splits. Because
/// nodes are `Rc`-shared they cannot cross threads, so split attachment is confined
/// to the thread that owns the expression.
#[derive(derive_more::Debug)]
pub struct ExprNode {
    /// Stable identity of this node.
    pub id: u64,
    pub(crate) kind: ExprKind,
    pub(crate) dtype: DType,
    #[debug(skip)]
    pub(crate) operator_splits: RefCell<SmallVec<[OperatorSplit; 1]>>,
}

impl ExprNode {
    pub(crate) fn new(kind: ExprKind) -> ExprRef {
        let dtype = match &kind {
            ExprKind::Access(access) => access.tensor.dtype(),
            ExprKind::Unary(_, a) => a.dtype,
            ExprKind::Binary(_, a, b) => DType::max_type(a.dtype, b.dtype),
            ExprKind::Immediate(imm) => imm.dtype(),
        };
        Rc::new(Self { id: next_expr_id(), kind, dtype, operator_splits: RefCell::default() })
    }

    pub(crate) fn unary(op: UnaryOp, a: ExprRef) -> ExprRef {
        Self::new(ExprKind::Unary(op, a))
    }

    pub(crate) fn binary(op: BinaryOp, a: ExprRef, b: ExprRef) -> ExprRef {
        Self::new(ExprKind::Binary(op, a, b))
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Operand nodes in evaluation order.
    pub fn children(&self) -> SmallVec<[&ExprRef; 2]> {
        match &self.kind {
            ExprKind::Access(_) | ExprKind::Immediate(_) => SmallVec::new(),
            ExprKind::Unary(_, a) => smallvec::smallvec![a],
            ExprKind::Binary(_, a, b) => smallvec::smallvec![a, b],
        }
    }

    /// Operator splits attached to this node, in attachment order.
    pub fn operator_splits(&self) -> SmallVec<[OperatorSplit; 1]> {
        self.operator_splits.borrow().clone()
    }
}

/// Handle to an index expression, possibly undefined.
///
/// Cloning is cheap and aliases the same node. There is no `PartialEq`: use
/// [`crate::equals`] for structural comparison and [`IndexExpr::ptr_eq`] for identity.
#[derive(Debug, Clone, Default)]
pub struct IndexExpr(Option<ExprRef>);

impl IndexExpr {
    /// The undefined expression.
    pub const fn undefined() -> Self {
        Self(None)
    }

    pub fn defined(&self) -> bool {
        self.0.is_some()
    }

    pub fn node(&self) -> Option<&ExprRef> {
        self.0.as_ref()
    }

    pub fn into_node(self) -> Option<ExprRef> {
        self.0
    }

    /// Identity comparison: same node, or both undefined.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn dtype(&self) -> Option<DType> {
        self.0.as_ref().map(|node| node.dtype)
    }

    /// View this expression as an access, if its root is an access node.
    pub fn as_access(&self) -> Option<Access> {
        Access::from_expr(self)
    }

    /// Record that `old` is split into `left` and `right` at this node.
    ///
    /// # Panics
    ///
    /// Panics on an undefined expression.
    #[track_caller]
    pub fn split_operator(&self, old: IndexVar, left: IndexVar, right: IndexVar) {
        let node = self.0.as_ref().expect("cannot attach an operator split to an undefined expression");
        let split = OperatorSplit::new(node.id, old, left, right);
        tracing::trace!(node.id = node.id, split = %split, "operator split attached");
        node.operator_splits.borrow_mut().push(split);
    }

    /// Operator splits attached to the root node (empty when undefined).
    pub fn operator_splits(&self) -> SmallVec<[OperatorSplit; 1]> {
        self.0.as_ref().map(|node| node.operator_splits()).unwrap_or_default()
    }
}

impl From<ExprRef> for IndexExpr {
    fn from(node: ExprRef) -> Self {
        Self(Some(node))
    }
}

impl From<&ExprRef> for IndexExpr {
    fn from(node: &ExprRef) -> Self {
        Self(Some(node.clone()))
    }
}

impl From<Option<ExprRef>> for IndexExpr {
    fn from(node: Option<ExprRef>) -> Self {
        Self(node)
    }
}

impl From<&IndexExpr> for IndexExpr {
    fn from(expr: &IndexExpr) -> Self {
        expr.clone()
    }
}
