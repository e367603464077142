//! Tensor paths through the iteration graph.
//!
//! Building the graph is the job of an earlier pass; lowering only asks it for the
//! path an access is iterated along.

use std::fmt;

use itertools::Itertools;
use tacit_ir::{Access, IndexVar};

/// Sequence of index variables an access's storage levels are iterated by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorPath {
    access: Access,
    variables: Vec<IndexVar>,
}

impl TensorPath {
    pub fn new(access: Access, variables: Vec<IndexVar>) -> Self {
        Self { access, variables }
    }

    pub fn access(&self) -> &Access {
        &self.access
    }

    pub fn variables(&self) -> &[IndexVar] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Step `step` of this path, if it exists.
    pub fn step(&self, step: usize) -> Option<TensorPathStep> {
        (step < self.variables.len()).then(|| TensorPathStep { path: self.clone(), step })
    }

    /// The deepest step (`None` for scalar paths).
    pub fn last_step(&self) -> Option<TensorPathStep> {
        self.variables.len().checked_sub(1).and_then(|last| self.step(last))
    }
}

impl fmt::Display for TensorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.access.tensor_var().name(), self.variables.iter().join(" -> "))
    }
}

/// One level of a [`TensorPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorPathStep {
    path: TensorPath,
    step: usize,
}

impl TensorPathStep {
    pub fn path(&self) -> &TensorPath {
        &self.path
    }

    /// Level index within the path.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Index variable iterating this level.
    pub fn variable(&self) -> &IndexVar {
        &self.path.variables[self.step]
    }
}

/// Iteration graph of a computation.
pub trait IterationGraph {
    /// Path `access` is iterated along, or `None` if the graph does not place it.
    fn tensor_path(&self, access: &Access) -> Option<TensorPath>;
}
