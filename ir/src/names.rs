//! Unique default names for unnamed index variables and tensors.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    /// Per-prefix counters used by [`unique_name`].
    static NAME_COUNTERS: RefCell<HashMap<char, u64>> = RefCell::default();
}

/// Generate a fresh name of the form `<prefix><n>` (`i0`, `i1`, `A0`, ...).
///
/// Counters are kept per prefix and per thread, so names are unique among the
/// entities created by one compilation thread.
pub fn unique_name(prefix: char) -> String {
    NAME_COUNTERS.with(|counters| {
        let mut counters = counters.borrow_mut();
        let counter = counters.entry(prefix).or_insert(0);
        let name = format!("{prefix}{counter}");
        *counter += 1;
        name
    })
}
