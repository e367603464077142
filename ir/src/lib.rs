//! Index-notation intermediate representation for the tacit tensor algebra compiler.
//!
//! This crate defines index expressions over tensors, the tensor entities that bind
//! them, and the structural operations lowering passes build on.
//!
//! # Module Organization
//!
//! - [`index_var`] - Index variables (identity tokens for loop dimensions)
//! - [`expr`] - Expression nodes, handles, constructors and printing
//! - [`visit`] - Read-only traversal
//! - [`rewrite`] - Bottom-up rewriting and [`rewrite::simplify`]
//! - [`equals`] - Structural equality
//! - [`tensor`] - Tensor variables and expression binding
//! - [`typecheck`] - Checks run when binding an expression
//! - [`query`] - Index variables, ranges and operands of a computation
//! - [`schedule`] - Operator splits
//! - [`types`] - Shapes, types and storage formats
//! - [`names`] - Default name generation
//! - [`error`] - Error types and result handling

pub mod equals;
pub mod error;
pub mod expr;
pub mod index_var;
pub mod names;
pub mod prelude;
pub mod query;
pub mod rewrite;
pub mod schedule;
pub mod tensor;
pub mod typecheck;
pub mod types;
pub mod visit;


pub use equals::equals;
pub use error::{Error, Result};
pub use expr::{Access, AccessNode, BinaryOp, Complex, ExprKind, ExprNode, ExprRef, Immediate, IndexExpr, UnaryOp};
pub use index_var::IndexVar;
pub use query::{get_accesses, get_index_var_ranges, get_index_vars, get_operands};
pub use rewrite::{ExprRewriter, simplify};
pub use schedule::{OperatorSplit, Schedule};
pub use tensor::TensorVar;
pub use types::{Dimension, Format, ModeType, Shape, Type};
pub use visit::ExprVisitor;

pub use tacit_dtype::DType;
