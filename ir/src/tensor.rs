//! Tensor variables and index-expression binding.
//!
//! A [`TensorVar`] is a handle to shared tensor content: a name, a [`Type`], a
//! storage [`Format`] and at most one bound index expression. Clones alias the
//! same tensor; equality, hashing and ordering are by entity identity.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use itertools::Itertools;
use smallvec::SmallVec;
use snafu::ensure;
use tacit_dtype::DType;

use crate::error::{
    DimensionMismatchSnafu, DistributionSnafu, OrderMismatchSnafu, ReassignmentSnafu, SelfReferenceSnafu,
    TranspositionSnafu, UndefinedExpressionSnafu,
};
use crate::expr::{Access, IndexExpr};
use crate::index_var::IndexVar;
use crate::names::unique_name;
use crate::query::get_operands;
use crate::schedule::Schedule;
use crate::types::{Format, Type};
use crate::{Result, typecheck};

static TENSOR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Index expression bound to a tensor, together with the result's free variables.
#[derive(Debug)]
struct Binding {
    free_vars: Vec<IndexVar>,
    expr: IndexExpr,
    accumulate: bool,
}

struct TensorContent {
    id: u64,
    name: String,
    ty: Type,
    format: Format,
    binding: OnceCell<Binding>,
}

/// Tensor entity used in index notation.
#[derive(Clone)]
pub struct TensorVar(Rc<TensorContent>);

impl TensorVar {
    /// Create a tensor.
    ///
    /// # Panics
    ///
    /// Panics if the format order differs from the type order.
    #[track_caller]
    pub fn new(name: impl Into<String>, ty: Type, format: Format) -> Self {
        assert_eq!(
            ty.order(),
            format.order(),
            "format order must match tensor order (type {ty}, format {format})"
        );
        Self(Rc::new(TensorContent {
            id: TENSOR_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed),
            name: name.into(),
            ty,
            format,
            binding: OnceCell::new(),
        }))
    }

    /// All-dense tensor with a generated name (`A0`, `A1`, ...).
    pub fn with_type(ty: Type) -> Self {
        Self::named(unique_name('A'), ty)
    }

    /// All-dense tensor in natural mode ordering.
    pub fn named(name: impl Into<String>, ty: Type) -> Self {
        let format = Format::dense(ty.order());
        Self::new(name, ty, format)
    }

    /// Order-0 tensor.
    pub fn scalar(name: impl Into<String>, dtype: DType) -> Self {
        Self::named(name, Type::scalar(dtype))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn order(&self) -> usize {
        self.0.ty.order()
    }

    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    pub fn dtype(&self) -> DType {
        self.0.ty.dtype()
    }

    pub fn format(&self) -> &Format {
        &self.0.format
    }

    /// Free variables of the bound expression (empty if unbound).
    pub fn free_vars(&self) -> &[IndexVar] {
        self.0.binding.get().map(|b| b.free_vars.as_slice()).unwrap_or_default()
    }

    /// The bound expression (undefined if unbound).
    pub fn index_expr(&self) -> IndexExpr {
        self.0.binding.get().map(|b| b.expr.clone()).unwrap_or_default()
    }

    pub fn is_bound(&self) -> bool {
        self.0.binding.get().is_some()
    }

    /// Whether the bound expression accumulates into the existing values.
    pub fn is_accumulating(&self) -> bool {
        self.0.binding.get().is_some_and(|b| b.accumulate)
    }

    /// Operator splits of the bound expression, recomputed on every call.
    pub fn schedule(&self) -> Schedule {
        Schedule::from_expr(&self.index_expr())
    }

    /// Access this tensor with `vars`.
    pub fn access<'a>(&self, vars: impl IntoIterator<Item = &'a IndexVar>) -> Result<Access> {
        let vars: SmallVec<[IndexVar; 4]> = vars.into_iter().cloned().collect();
        ensure!(
            vars.len() == self.order(),
            OrderMismatchSnafu {
                tensor: self.name(),
                order: self.order(),
                got: vars.len(),
                vars: vars.iter().join(","),
            }
        );
        Ok(Access::new(self.clone(), vars))
    }

    /// Bind `expr` to this tensor with result variables `free_vars`.
    ///
    /// Fails if the tensor is already bound, `expr` is undefined or reads this
    /// tensor (also through other bound tensors), `free_vars` does not match the
    /// tensor order, dimensions disagree, or the computation needs a transposition
    /// or distribution.
    pub fn set_index_expression(&self, free_vars: Vec<IndexVar>, expr: IndexExpr, accumulate: bool) -> Result<()> {
        self.check_binding(&free_vars, &expr).inspect_err(|err| {
            tracing::warn!(tensor = %self.name(), error = %err, "rejected index expression");
        })?;

        tracing::debug!(
            tensor = %self.name(),
            free_vars = %free_vars.iter().join(","),
            expr = %expr,
            accumulate,
            "bound index expression"
        );
        let bound = self.0.binding.set(Binding { free_vars, expr, accumulate });
        assert!(bound.is_ok(), "binding of {} changed during validation", self.name());
        Ok(())
    }

    /// Whether `expr` reads this tensor, directly or through the bound expression
    /// of a tensor it reads.
    fn is_read_by(&self, expr: &IndexExpr) -> bool {
        let mut pending = get_operands(expr);
        let mut seen = Vec::new();
        while let Some(operand) = pending.pop() {
            if operand == *self {
                return true;
            }
            if !seen.contains(&operand) {
                pending.extend(get_operands(&operand.index_expr()));
                seen.push(operand);
            }
        }
        false
    }

    fn check_binding(&self, free_vars: &[IndexVar], expr: &IndexExpr) -> Result<()> {
        let tensor = self.name();
        ensure!(!self.is_bound(), ReassignmentSnafu { tensor });
        ensure!(expr.defined(), UndefinedExpressionSnafu { tensor });
        ensure!(!self.is_read_by(expr), SelfReferenceSnafu { tensor });
        ensure!(
            free_vars.len() == self.order(),
            OrderMismatchSnafu { tensor, order: self.order(), got: free_vars.len(), vars: free_vars.iter().join(",") }
        );

        let shape = self.0.ty.shape();
        ensure!(
            typecheck::dimensions_typecheck(free_vars, expr, shape),
            DimensionMismatchSnafu { tensor, details: typecheck::dimension_typecheck_errors(free_vars, expr, shape) }
        );
        ensure!(!typecheck::contains_transpose(self.format(), free_vars, expr), TranspositionSnafu { tensor });

        let missing = typecheck::missing_free_vars(free_vars, expr);
        ensure!(missing.is_empty(), DistributionSnafu { tensor, vars: missing.iter().join(",") });
        Ok(())
    }
}

impl PartialEq for TensorVar {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for TensorVar {}

impl Hash for TensorVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl PartialOrd for TensorVar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TensorVar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.id.cmp(&other.0.id)
    }
}

// Does not print the bound expression: it may access this tensor again.
impl fmt::Debug for TensorVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorVar")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("ty", &self.0.ty)
            .field("format", &self.0.format)
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl fmt::Display for TensorVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.0.name, self.0.ty)
    }
}
