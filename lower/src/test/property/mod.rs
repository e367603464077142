//! Property-based tests for expression partitioning and lowering.

mod partition_props;
