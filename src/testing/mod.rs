//! Test doubles for workload tests.
//!
//! Compiled into the library so integration tests can drive the workload
//! machinery without a live store.

mod store;

pub use store::{MockStore, StoreCallCounts};
