//! Configuration for expression partitioning.
//!
//! Provides typed configuration with bon builders and environment variable
//! fallbacks.

use bon::bon;
use tacit_ir::{ExprKind, IndexExpr};

/// Predicate deciding whether an available expression is too small to hoist.
pub type TrivialPredicate = fn(&IndexExpr) -> bool;

/// A lone immediate or a lone access to an order-0 tensor.
pub fn is_trivial_expr(expr: &IndexExpr) -> bool {
    match expr.node().map(|node| node.kind()) {
        Some(ExprKind::Immediate(_)) => true,
        Some(ExprKind::Access(access)) => access.tensor_var().order() == 0,
        _ => false,
    }
}

/// Configuration of [`crate::get_available_expressions_with`].
#[derive(Debug, Clone, Copy)]
pub struct AvailableExprConfig {
    /// Drop available expressions matching `predicate` from the result.
    pub elide_trivial: bool,
    /// What counts as trivial. Defaults to [`is_trivial_expr`].
    pub predicate: TrivialPredicate,
}

impl Default for AvailableExprConfig {
    fn default() -> Self {
        Self { elide_trivial: false, predicate: is_trivial_expr }
    }
}

#[bon]
impl AvailableExprConfig {
    /// Create a configuration with builder pattern.
    #[builder]
    pub fn builder(
        #[builder(default = false)] elide_trivial: bool,
        #[builder(default = is_trivial_expr as TrivialPredicate)] predicate: TrivialPredicate,
    ) -> Self {
        Self { elide_trivial, predicate }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `TACIT_ELIDE_TRIVIAL` - Elide trivial available expressions when set to anything other than `0`
    pub fn from_env() -> Self {
        let elide_trivial = std::env::var("TACIT_ELIDE_TRIVIAL").is_ok_and(|v| v != "0");
        Self { elide_trivial, ..Default::default() }
    }

    /// Elide expressions matching `predicate` instead of the default.
    pub fn with_predicate(self, predicate: TrivialPredicate) -> Self {
        Self { elide_trivial: true, predicate }
    }

    /// Whether `expr` is dropped from the available expressions.
    pub fn elides(&self, expr: &IndexExpr) -> bool {
        self.elide_trivial && (self.predicate)(expr)
    }
}
