//! Static checks run when an index expression is bound to a tensor.
//!
//! * dimension typecheck: an index variable must index modes of one size;
//! * transposition: some tensor would be iterated against its storage order;
//! * distribution: a free variable never appears on the right hand side.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::expr::IndexExpr;
use crate::index_var::IndexVar;
use crate::types::{Dimension, Format, Shape};
use crate::visit::match_accesses;

/// Index variable used to index modes of two different sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionConflict {
    pub var: IndexVar,
    pub first: Dimension,
    pub second: Dimension,
}

/// Every conflicting variable, reported once, in discovery order.
///
/// Free variables are checked against `shape` (the result shape) first, then each
/// access's variables against the accessed tensor's shape. A variable dimension is
/// compatible with any size; the first fixed size seen for a variable is the
/// reference for later modes.
pub fn dimension_conflicts(free_vars: &[IndexVar], expr: &IndexExpr, shape: &Shape) -> Vec<DimensionConflict> {
    let mut seen: BTreeMap<IndexVar, Dimension> = BTreeMap::new();
    let mut conflicts: Vec<DimensionConflict> = Vec::new();

    let mut record = |var: &IndexVar, dim: Dimension| match seen.get(var).copied() {
        None | Some(Dimension::Variable) => {
            seen.insert(var.clone(), dim);
        }
        Some(prev @ Dimension::Fixed(_)) => {
            if !dim.is_variable() && prev != dim && conflicts.iter().all(|c| &c.var != var) {
                conflicts.push(DimensionConflict { var: var.clone(), first: prev, second: dim });
            }
        }
    };

    for (mode, var) in free_vars.iter().enumerate() {
        if let Some(dim) = shape.dimension(mode) {
            record(var, dim);
        }
    }
    match_accesses(expr, |_, access| {
        let shape = access.tensor_var().ty().shape();
        for (mode, var) in access.index_vars().iter().enumerate() {
            if let Some(dim) = shape.dimension(mode) {
                record(var, dim);
            }
        }
    });

    conflicts
}

/// True if no index variable indexes modes of different sizes.
pub fn dimensions_typecheck(free_vars: &[IndexVar], expr: &IndexExpr, shape: &Shape) -> bool {
    dimension_conflicts(free_vars, expr, shape).is_empty()
}

/// Human readable description of every dimension conflict, one sentence each.
pub fn dimension_typecheck_errors(free_vars: &[IndexVar], expr: &IndexExpr, shape: &Shape) -> String {
    dimension_conflicts(free_vars, expr, shape)
        .iter()
        .map(|c| {
            format!("Index variable {} is used to index modes of different dimensions ({} and {}).", c.var, c.first, c.second)
        })
        .join(" ")
}

/// Variables of `vars` listed in storage order, i.e. permuted by the format's mode
/// ordering.
fn storage_order<'a>(format: &Format, vars: &'a [IndexVar]) -> impl Iterator<Item = &'a IndexVar> {
    let ordering = format.mode_ordering();
    (0..vars.len()).map(move |level| &vars[ordering.get(level).copied().unwrap_or(level)])
}

/// True if the result and the operands disagree on the relative order in which
/// index variables are iterated.
///
/// Every tensor contributes edges between consecutive variables in its storage
/// order; a cycle in the resulting graph means no loop order satisfies all of them.
/// Repeated variables inside one access (`A(i,i)`) do not constrain the order.
pub fn contains_transpose(format: &Format, free_vars: &[IndexVar], expr: &IndexExpr) -> bool {
    let mut successors: BTreeMap<IndexVar, BTreeSet<IndexVar>> = BTreeMap::new();
    let mut add_path = |format: &Format, vars: &[IndexVar]| {
        for (from, to) in storage_order(format, vars).tuple_windows() {
            if from != to {
                successors.entry(from.clone()).or_default().insert(to.clone());
            }
        }
    };

    add_path(format, free_vars);
    match_accesses(expr, |_, access| add_path(access.tensor_var().format(), access.index_vars()));

    has_cycle(&successors)
}

fn has_cycle(successors: &BTreeMap<IndexVar, BTreeSet<IndexVar>>) -> bool {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        InProgress,
        Done,
    }

    fn visit<'a>(
        var: &'a IndexVar,
        successors: &'a BTreeMap<IndexVar, BTreeSet<IndexVar>>,
        marks: &mut BTreeMap<&'a IndexVar, Mark>,
    ) -> bool {
        match marks.get(var) {
            Some(Mark::InProgress) => return true,
            Some(Mark::Done) => return false,
            None => {}
        }
        marks.insert(var, Mark::InProgress);
        let cyclic = successors.get(var).is_some_and(|next| next.iter().any(|n| visit(n, successors, marks)));
        marks.insert(var, Mark::Done);
        cyclic
    }

    let mut marks = BTreeMap::new();
    successors.keys().any(|var| visit(var, successors, &mut marks))
}

/// Free variables that appear in no access of `expr`, in declaration order.
pub fn missing_free_vars(free_vars: &[IndexVar], expr: &IndexExpr) -> Vec<IndexVar> {
    let mut used = BTreeSet::new();
    match_accesses(expr, |_, access| used.extend(access.index_vars().iter().cloned()));
    free_vars.iter().filter(|var| !used.contains(*var)).cloned().collect()
}

/// True if some free variable does not appear on the right hand side, which would
/// require broadcasting (distributing) values over that variable.
pub fn contains_distribution(free_vars: &[IndexVar], expr: &IndexExpr) -> bool {
    !missing_free_vars(free_vars, expr).is_empty()
}
