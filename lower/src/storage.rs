//! Storage iterators over tensor levels.

use crate::iteration_graph::{TensorPath, TensorPathStep};
use crate::scalar::ScalarVar;

/// Iterator over one storage level of a tensor.
///
/// `ptr_var` holds the current position in the level's storage, `idx_var` the
/// coordinate at that position.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageIterator {
    tensor: ScalarVar,
    ptr_var: ScalarVar,
    idx_var: ScalarVar,
}

impl StorageIterator {
    pub fn new(tensor: ScalarVar, ptr_var: ScalarVar, idx_var: ScalarVar) -> Self {
        Self { tensor, ptr_var, idx_var }
    }

    /// Tensor variable the iterator walks.
    pub fn tensor(&self) -> &ScalarVar {
        &self.tensor
    }

    pub fn ptr_var(&self) -> &ScalarVar {
        &self.ptr_var
    }

    pub fn idx_var(&self) -> &ScalarVar {
        &self.idx_var
    }
}

/// Storage iterators of every tensor path in a computation.
pub trait Iterators {
    /// Iterator positioned at the root of `path`'s tensor (used for scalars).
    fn root(&self, path: &TensorPath) -> Option<StorageIterator>;

    /// Iterator over the level reached by `step`.
    fn step(&self, step: &TensorPathStep) -> Option<StorageIterator>;
}

/// Index variables of `iterators`, in order.
pub fn idx_vars(iterators: &[StorageIterator]) -> Vec<ScalarVar> {
    iterators.iter().map(|it| it.idx_var().clone()).collect()
}
