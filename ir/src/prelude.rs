//! Common imports for building and inspecting index expressions.
//!
//! ```rust,ignore
//! use tacit_ir::prelude::*;
//! ```

// Core types
pub use crate::expr::{Access, ExprKind, ExprRef, IndexExpr};
pub use crate::index_var::IndexVar;
pub use crate::tensor::TensorVar;

// Operators and literals
pub use crate::expr::{BinaryOp, Complex, Immediate, UnaryOp};

// Shapes and formats
pub use crate::types::{Dimension, Format, ModeType, Shape, Type};

// Traversal
pub use crate::rewrite::ExprRewriter;
pub use crate::visit::ExprVisitor;

// Re-exports from dependencies
pub use tacit_dtype::DType;
