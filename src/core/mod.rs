//! Core business logic - framework-agnostic aggregation and reporting.
//!
//! Everything here is pure with respect to its inputs: the rollup and
//! series functions take snapshotted collections, perform no I/O, and are
//! idempotent. The store layer supplies the data; the binary formats the
//! output.

pub mod dates;
pub mod report;
pub mod rollup;
pub mod series;
