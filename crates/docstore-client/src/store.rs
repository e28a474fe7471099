//! The store collaborator contract.

use std::fmt;

use async_trait::async_trait;
use loadtest_products::Product;

use crate::error::StoreResult;

/// Routing hint isolating capacity for a workload class.
///
/// Forwarded to the store on query operations when the workload is
/// configured to run against a dedicated throughput bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThroughputBucket(pub u32);

impl fmt::Display for ThroughputBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remote document store operations the workload drivers require.
///
/// Implementations must surface rate limiting as
/// [`StoreError::RateLimited`](crate::StoreError::RateLimited) so drivers
/// can count throttled operations separately from failures.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point-read a product by its string id. `Ok(None)` when absent.
    async fn point_read(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Open a filtered query selecting the product with the given id,
    /// returning a pager over the result pages.
    async fn query_by_id(
        &self,
        id: &str,
        bucket: Option<ThroughputBucket>,
    ) -> StoreResult<Box<dyn QueryPager>>;

    /// Insert a new product document.
    async fn create(&self, product: &Product) -> StoreResult<()>;

    /// Largest numeric product id currently stored, or 0 when the store is
    /// empty. A single typed scalar aggregate.
    async fn current_max_id(&self) -> StoreResult<i64>;
}

/// Paged traversal over one query's results.
#[async_trait]
pub trait QueryPager: Send {
    /// The next page of results, or `Ok(None)` once exhausted.
    async fn next_page(&mut self) -> StoreResult<Option<Vec<Product>>>;
}
