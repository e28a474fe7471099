//! Document store client seam for docstore-bench.
//!
//! Workload drivers talk to the store through the [`DocumentStore`] trait
//! and classify every failure with [`StoreError`]: rate limiting is a
//! first-class, expected outcome under sustained load, distinct from any
//! other backend error. The [`mongodb`] module provides the wire-protocol
//! backend; tests substitute their own implementations.

pub mod error;
pub mod mongodb;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use mongodb::{MongoStore, MongoStoreConfig};
pub use store::{DocumentStore, QueryPager, ThroughputBucket};
