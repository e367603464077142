//! Expression partitioning and scalar lowering for tacit.
//!
//! Given a bound index expression, these passes decide what can be hoisted at a
//! loop level, what still depends on the remaining loop variables, and produce
//! the scalar code evaluated at each iteration point.
//!
//! # Module Organization
//!
//! - [`available`] - Maximal sub-expressions computable at a loop level
//! - [`sub_expr`] - Sub-expression still depending on given variables
//! - [`scalar_code`] - Scalar lowering and loop-variable helpers
//! - [`scalar`] - Scalar expressions and statements
//! - [`iteration_graph`] - Tensor paths consumed by lowering
//! - [`storage`] - Storage iterators consumed by lowering
//! - [`config`] - Partitioning configuration

pub mod available;
pub mod config;
pub mod iteration_graph;
pub mod scalar;
pub mod scalar_code;
pub mod storage;
pub mod sub_expr;

#[cfg(test)]
pub mod test;

pub use available::{get_available_expressions, get_available_expressions_with};
pub use config::AvailableExprConfig;
pub use iteration_graph::{IterationGraph, TensorPath, TensorPathStep};
pub use scalar::{ScalarExpr, ScalarVar, Stmt, TensorProperty};
pub use scalar_code::{TensorVars, get_tensor_vars, lower_to_scalar_expression, merge_path_index_vars, print_coordinate};
pub use storage::{Iterators, StorageIterator};
pub use sub_expr::get_sub_expr;
