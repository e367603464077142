//! Queries over a tensor's bound computation.

use std::collections::{BTreeMap, BTreeSet};

use crate::expr::{Access, IndexExpr};
use crate::index_var::IndexVar;
use crate::tensor::TensorVar;
use crate::types::Dimension;
use crate::visit::match_accesses;

/// Every access reachable from `expr`, left to right (shared nodes once per
/// occurrence).
pub fn get_accesses(expr: &IndexExpr) -> Vec<Access> {
    let mut accesses = Vec::new();
    match_accesses(expr, |node, _| accesses.push(Access::from_node(node.clone())));
    accesses
}

/// The free variables of `tensor` plus every variable used by an access of its
/// bound expression.
pub fn get_index_vars(tensor: &TensorVar) -> BTreeSet<IndexVar> {
    let mut vars: BTreeSet<IndexVar> = tensor.free_vars().iter().cloned().collect();
    match_accesses(&tensor.index_expr(), |_, access| vars.extend(access.index_vars().iter().cloned()));
    vars
}

/// Range of every index variable of `tensor`'s computation.
///
/// Free variables take the result's mode dimensions; access variables take the
/// accessed tensor's mode dimensions, in traversal order. The first dimension
/// recorded for a variable wins.
pub fn get_index_var_ranges(tensor: &TensorVar) -> BTreeMap<IndexVar, Dimension> {
    let mut ranges = BTreeMap::new();
    let shape = tensor.ty().shape();
    for (mode, var) in tensor.free_vars().iter().enumerate() {
        if let Some(dim) = shape.dimension(mode) {
            ranges.entry(var.clone()).or_insert(dim);
        }
    }
    match_accesses(&tensor.index_expr(), |_, access| {
        let shape = access.tensor_var().ty().shape();
        for (mode, var) in access.index_vars().iter().enumerate() {
            if let Some(dim) = shape.dimension(mode) {
                ranges.entry(var.clone()).or_insert(dim);
            }
        }
    });
    ranges
}

/// Distinct tensors accessed by `expr`, in order of first access.
pub fn get_operands(expr: &IndexExpr) -> Vec<TensorVar> {
    let mut operands: Vec<TensorVar> = Vec::new();
    match_accesses(expr, |_, access| {
        if !operands.contains(access.tensor_var()) {
            operands.push(access.tensor_var().clone());
        }
    });
    operands
}
