//! Generators for property-based testing.
//!
//! Strategies produce plain [`ExprSpec`] descriptions; [`Fixture::build`] turns a
//! description into an expression over a fixed set of tensors and index variables.
//! Keeping `Rc` nodes out of strategy values lets proptest shrink freely.

use std::collections::HashSet;

use proptest::collection::vec;
use proptest::prelude::*;

use tacit_dtype::DType;

use crate::expr::{Access, BinaryOp, IndexExpr};
use crate::index_var::IndexVar;
use crate::tensor::TensorVar;
use crate::types::{Shape, Type};

/// Order of each fixture tensor, by index.
pub const TENSOR_ORDERS: [usize; 5] = [0, 1, 1, 2, 2];

/// Number of fixture index variables.
pub const VAR_COUNT: usize = 3;

/// Mode size shared by every fixture tensor.
pub const DIM: usize = 4;

/// Tensors `s` (scalar), `v`, `w` (vectors), `M`, `N` (matrices) and index
/// variables `i`, `j`, `k`. Every mode has size [`DIM`].
pub struct Fixture {
    pub vars: Vec<IndexVar>,
    pub tensors: Vec<TensorVar>,
}

impl Fixture {
    pub fn new() -> Self {
        let vars = ["i", "j", "k"].into_iter().map(IndexVar::named).collect();
        let tensors = ["s", "v", "w", "M", "N"]
            .into_iter()
            .zip(TENSOR_ORDERS)
            .map(|(name, order)| TensorVar::named(name, Type::new(DType::Float64, Shape::fixed(&vec![DIM; order]))))
            .collect();
        Self { vars, tensors }
    }

    pub fn access(&self, tensor: usize, vars: &[usize]) -> Access {
        self.tensors[tensor].access(vars.iter().map(|&v| &self.vars[v])).expect("fixture access has the tensor order")
    }

    pub fn build(&self, spec: &ExprSpec) -> IndexExpr {
        match spec {
            ExprSpec::Access { tensor, vars } => self.access(*tensor, vars).into(),
            ExprSpec::Neg(a) => -self.build(a),
            ExprSpec::Sqrt(a) => self.build(a).sqrt(),
            ExprSpec::Binary(op, a, b) => IndexExpr::binary(*op, self.build(a), self.build(b)),
            ExprSpec::Int(v) => IndexExpr::int(*v),
            ExprSpec::Float(v) => IndexExpr::float(*v),
        }
    }

    /// Variables selected by `mask` (one flag per fixture variable).
    pub fn var_set(&self, mask: &[bool]) -> HashSet<IndexVar> {
        self.vars.iter().zip(mask).filter(|(_, keep)| **keep).map(|(var, _)| var.clone()).collect()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain description of an index expression over a [`Fixture`].
#[derive(Debug, Clone)]
pub enum ExprSpec {
    Access { tensor: usize, vars: Vec<usize> },
    Neg(Box<ExprSpec>),
    Sqrt(Box<ExprSpec>),
    Binary(BinaryOp, Box<ExprSpec>, Box<ExprSpec>),
    Int(i64),
    Float(f64),
}

pub fn arb_binary_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![Just(BinaryOp::Add), Just(BinaryOp::Sub), Just(BinaryOp::Mul), Just(BinaryOp::Div)]
}

/// Access to a random fixture tensor with random (possibly repeated) variables.
pub fn arb_access_spec() -> impl Strategy<Value = ExprSpec> {
    (0..TENSOR_ORDERS.len()).prop_flat_map(|tensor| {
        vec(0..VAR_COUNT, TENSOR_ORDERS[tensor]).prop_map(move |vars| ExprSpec::Access { tensor, vars })
    })
}

pub fn arb_leaf_spec() -> impl Strategy<Value = ExprSpec> {
    prop_oneof![
        6 => arb_access_spec(),
        1 => (-10i64..=10).prop_map(ExprSpec::Int),
        1 => (-100.0..=100.0).prop_map(ExprSpec::Float),
    ]
}

/// Expression trees up to depth 5.
pub fn arb_expr_spec() -> impl Strategy<Value = ExprSpec> {
    arb_leaf_spec().prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            1 => inner.clone().prop_map(|a| ExprSpec::Neg(Box::new(a))),
            1 => inner.clone().prop_map(|a| ExprSpec::Sqrt(Box::new(a))),
            4 => (arb_binary_op(), inner.clone(), inner).prop_map(|(op, a, b)| ExprSpec::Binary(op, Box::new(a), Box::new(b))),
        ]
    })
}

/// One flag per fixture variable.
pub fn arb_var_mask() -> impl Strategy<Value = Vec<bool>> {
    vec(any::<bool>(), VAR_COUNT)
}

/// Flags selecting accesses by traversal position (wrapping around).
pub fn arb_access_mask() -> impl Strategy<Value = Vec<bool>> {
    vec(any::<bool>(), 1..16)
}
