//! Property-based tests for expression passes.
//!
//! [`generators`] is also compiled under the `proptest` feature so downstream
//! crates can generate expressions over the same tensors.


pub mod generators;
