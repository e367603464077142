//! Translation of index expressions into scalar code.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use tacit_dtype::DType;
use tacit_ir::{Access, BinaryOp, ExprKind, ExprRef, IndexExpr, TensorVar, UnaryOp, get_operands};

use crate::iteration_graph::IterationGraph;
use crate::scalar::{ScalarExpr, ScalarVar, Stmt, TensorProperty};
use crate::storage::{Iterators, StorageIterator, idx_vars};

/// Scalar-IR variables of one tensor computation.
#[derive(Debug, Clone, Default)]
pub struct TensorVars {
    /// Operand tensors, in order of first access.
    pub parameters: Vec<ScalarVar>,
    /// The result tensor.
    pub results: Vec<ScalarVar>,
    /// Variable of every tensor taking part in the computation.
    pub mapping: BTreeMap<TensorVar, ScalarVar>,
}

fn tensor_var(tensor: &TensorVar) -> ScalarVar {
    ScalarVar::tensor(tensor.name(), tensor.dtype(), tensor.format().clone())
}

/// Scalar-IR variables for `tensor` (the result) and every operand of its bound
/// expression (the parameters).
///
/// # Panics
///
/// Panics if the result tensor also appears among its operands, which binding
/// already rejects.
pub fn get_tensor_vars(tensor: &TensorVar) -> TensorVars {
    let mut vars = TensorVars::default();

    let result = tensor_var(tensor);
    vars.mapping.insert(tensor.clone(), result.clone());
    vars.results.push(result);

    for operand in get_operands(&tensor.index_expr()) {
        assert!(!vars.mapping.contains_key(&operand), "tensor {} reads its own result", operand.name());
        let var = tensor_var(&operand);
        vars.mapping.insert(operand, var.clone());
        vars.parameters.push(var);
    }

    tracing::debug!(
        tensor = %tensor.name(),
        parameters = %vars.parameters.iter().join(","),
        "collected tensor variables"
    );
    vars
}

struct ScalarCode<'a> {
    iterators: &'a dyn Iterators,
    graph: &'a dyn IterationGraph,
    temporaries: &'a HashMap<TensorVar, ScalarExpr>,
}

impl ScalarCode<'_> {
    fn lower(&self, node: &ExprRef) -> ScalarExpr {
        match node.kind() {
            ExprKind::Access(access) => {
                if let Some(temporary) = self.temporaries.get(access.tensor_var()) {
                    return temporary.clone();
                }
                self.load(&Access::from_node(node.clone()))
            }
            ExprKind::Unary(UnaryOp::Neg, a) => ScalarExpr::neg(self.lower(a)),
            ExprKind::Unary(UnaryOp::Sqrt, a) => ScalarExpr::sqrt(self.lower(a)),
            ExprKind::Binary(BinaryOp::Add, a, b) => ScalarExpr::add(self.lower(a), self.lower(b)),
            ExprKind::Binary(BinaryOp::Sub, a, b) => ScalarExpr::sub(self.lower(a), self.lower(b)),
            ExprKind::Binary(BinaryOp::Mul, a, b) => ScalarExpr::mul(self.lower(a), self.lower(b)),
            ExprKind::Binary(BinaryOp::Div, a, b) => ScalarExpr::div(self.lower(a), self.lower(b)),
            ExprKind::Immediate(value) => ScalarExpr::literal(*value),
        }
    }

    /// Load of the access's value at the current position of its innermost iterator.
    fn load(&self, access: &Access) -> ScalarExpr {
        let Some(path) = self.graph.tensor_path(access) else {
            panic!("iteration graph has no path for {access}");
        };
        let iterator = if access.tensor_var().order() == 0 {
            self.iterators.root(&path)
        } else {
            path.last_step().and_then(|step| self.iterators.step(&step))
        };
        let Some(iterator) = iterator else {
            panic!("no storage iterator for {access} along {path}");
        };

        let values = ScalarExpr::get_property(ScalarExpr::var(iterator.tensor().clone()), TensorProperty::Values);
        ScalarExpr::load(values, ScalarExpr::var(iterator.ptr_var().clone()))
    }
}

/// Scalar code computing `expr` at the current iteration point.
///
/// Accesses to tensors in `temporaries` become the temporary's expression; every
/// other access loads from its storage at the pointer of the iterator for the last
/// step of its path (the root iterator for scalars). Returns `None` for an
/// undefined expression.
///
/// # Panics
///
/// Panics if `graph` has no path, or `iterators` no iterator, for an access that is
/// not a temporary.
#[tracing::instrument(skip_all, fields(expr = %expr))]
pub fn lower_to_scalar_expression(
    expr: &IndexExpr,
    iterators: &dyn Iterators,
    graph: &dyn IterationGraph,
    temporaries: &HashMap<TensorVar, ScalarExpr>,
) -> Option<ScalarExpr> {
    let node = expr.node()?;
    let code = ScalarCode { iterators, graph, temporaries }.lower(node);
    tracing::trace!(code = %code, "lowered scalar expression");
    Some(code)
}

/// `var = min(path_vars)`.
pub fn merge_path_index_vars(var: &ScalarVar, path_vars: &[ScalarExpr]) -> Stmt {
    Stmt::assign(var.clone(), ScalarExpr::min(path_vars.iter().cloned()))
}

/// Smallest current coordinate among `iterators`.
///
/// A single iterator's index variable is returned directly. Otherwise an `int32`
/// variable named `result_name` is declared as the minimum of all index variables;
/// the declaration is appended to `statements` and the variable returned.
///
/// # Panics
///
/// Panics if `iterators` is empty.
pub fn min(result_name: &str, iterators: &[StorageIterator], statements: &mut Vec<Stmt>) -> ScalarExpr {
    match iterators {
        [] => panic!("min over an empty iterator list"),
        [single] => ScalarExpr::var(single.idx_var().clone()),
        _ => {
            let min_var = ScalarVar::new(result_name, DType::Int32);
            let min_expr = ScalarExpr::min(idx_vars(iterators).into_iter().map(ScalarExpr::var));
            statements.push(Stmt::declare(min_var.clone(), min_expr));
            ScalarExpr::var(min_var)
        }
    }
}

/// Statement printing the coordinate `(i, j) = (%d,%d)` of `index_vars`.
///
/// The format string carries a C newline escape.
pub fn print_coordinate(index_vars: &[ScalarExpr]) -> Vec<Stmt> {
    let names = index_vars.iter().join(", ");
    let placeholders = index_vars.iter().map(|_| "%d").join(",");
    vec![Stmt::print(format!("({names}) = ({placeholders})\\n"), index_vars.to_vec())]
}
