//! Identity tokens naming loop and reduction dimensions.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::names::unique_name;

// Monotonic handle source. Handles never repeat, so identity survives clones.
static INDEX_VAR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Index variable used to index tensor modes in index notation.
///
/// Equality, hashing and ordering use the handle assigned at creation, never the
/// name: two variables both named `i` are different variables. Clones alias the
/// same variable.
#[derive(Clone)]
pub struct IndexVar {
    id: u64,
    name: Arc<str>,
}

impl IndexVar {
    /// Create a variable with a generated name (`i0`, `i1`, ...).
    pub fn new() -> Self {
        Self::named(unique_name('i'))
    }

    /// Create a variable with the given display name.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self { id: INDEX_VAR_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed), name: name.into() }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for IndexVar {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for IndexVar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for IndexVar {}

impl Hash for IndexVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for IndexVar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexVar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Debug for IndexVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

impl std::fmt::Display for IndexVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
