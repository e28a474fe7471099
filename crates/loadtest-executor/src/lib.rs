//! Concurrency-bounded workload execution for docstore-bench.
//!
//! This crate provides the two shared pieces every workload driver is built
//! on:
//!
//! 1. [`run_bounded`] - a pull-based worker pool that executes a batch of
//!    work items with a fixed number of concurrent workers.
//! 2. [`WorkloadCounters`] - atomic succeeded/throttled tallies per
//!    operation kind, drained periodically by the stats reporter.
//!
//! Workers record outcomes into the counters from inside the operation
//! closure; the executor itself is outcome-agnostic.

pub mod counters;
pub mod executor;

pub use counters::{OpCounter, OpDelta, OpKind, WorkloadCounters};
pub use executor::run_bounded;
