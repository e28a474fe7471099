//! Scriptable in-memory document store.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use docstore_client::{DocumentStore, QueryPager, StoreError, StoreResult, ThroughputBucket};
use loadtest_products::Product;
use tokio::sync::Mutex;

/// Observed call tallies, one per store operation.
#[derive(Debug, Default)]
pub struct StoreCallCounts {
    pub point_reads: AtomicU64,
    pub queries: AtomicU64,
    pub creates: AtomicU64,
    pub max_id_queries: AtomicU64,
}

/// In-memory [`DocumentStore`] with scriptable throttling and failures.
///
/// Ids listed as rate-limited or failing affect point reads, queries, and
/// creates alike. Query results are served as `pages_per_query` pages, so
/// per-page accounting is observable.
pub struct MockStore {
    products: Mutex<HashMap<String, Product>>,
    rate_limited_ids: HashSet<String>,
    failing_ids: HashSet<String>,
    pages_per_query: usize,
    throttle_after_pages: Option<usize>,
    base_max_id: i64,
    retry_after: Option<Duration>,
    op_delay: Option<Duration>,
    pub calls: StoreCallCounts,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(HashMap::new()),
            rate_limited_ids: HashSet::new(),
            failing_ids: HashSet::new(),
            pages_per_query: 1,
            throttle_after_pages: None,
            base_max_id: 0,
            retry_after: None,
            op_delay: None,
            calls: StoreCallCounts::default(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Ids that come back rate-limited on every operation.
    pub fn with_rate_limited_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rate_limited_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Ids that fail with a backend error on every operation.
    pub fn with_failing_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Number of pages every successful query yields.
    pub fn with_pages_per_query(mut self, pages: usize) -> Self {
        self.pages_per_query = pages.max(1);
        self
    }

    /// Rate-limit pagination after this many pages have been served.
    pub fn with_throttle_after_pages(mut self, pages: usize) -> Self {
        self.throttle_after_pages = Some(pages);
        self
    }

    /// Lower bound reported by `current_max_id`, regardless of what is
    /// stored.
    pub fn with_current_max_id(mut self, max_id: i64) -> Self {
        self.base_max_id = max_id;
        self
    }

    /// Suggested wait attached to every rate-limited outcome.
    pub fn with_retry_after(mut self, hint: Duration) -> Self {
        self.retry_after = Some(hint);
        self
    }

    /// Delay applied inside every operation, so tests can observe the worker
    /// pool actually running concurrently.
    pub fn with_op_delay(mut self, delay: Duration) -> Self {
        self.op_delay = Some(delay);
        self
    }

    /// Highest number of operations observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Stored products (seeded plus created), sorted by numeric id.
    pub async fn stored_products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.lock().await.values().cloned().collect();
        products.sort_by_key(|p| p.numeric_id);
        products
    }

    pub async fn seed_products<I>(&self, products: I)
    where
        I: IntoIterator<Item = Product>,
    {
        let mut stored = self.products.lock().await;
        for product in products {
            stored.insert(product.id.clone(), product);
        }
    }

    async fn enter_op(&self) -> OpGuard<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let guard = OpGuard { store: self };
        if let Some(delay) = self.op_delay {
            tokio::time::sleep(delay).await;
        }
        guard
    }

    fn outcome_for(&self, id: &str) -> StoreResult<()> {
        if self.rate_limited_ids.contains(id) {
            return Err(StoreError::RateLimited {
                retry_after: self.retry_after,
            });
        }
        if self.failing_ids.contains(id) {
            return Err(StoreError::Backend(format!("scripted failure for id {id}")));
        }
        Ok(())
    }
}

struct OpGuard<'a> {
    store: &'a MockStore,
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        self.store.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn point_read(&self, id: &str) -> StoreResult<Option<Product>> {
        let _guard = self.enter_op().await;
        self.calls.point_reads.fetch_add(1, Ordering::Relaxed);
        self.outcome_for(id)?;
        Ok(self.products.lock().await.get(id).cloned())
    }

    async fn query_by_id(
        &self,
        id: &str,
        _bucket: Option<ThroughputBucket>,
    ) -> StoreResult<Box<dyn QueryPager>> {
        let _guard = self.enter_op().await;
        self.calls.queries.fetch_add(1, Ordering::Relaxed);
        self.outcome_for(id)?;

        let matched = self.products.lock().await.get(id).cloned();
        Ok(Box::new(MockPager {
            pages_left: self.pages_per_query,
            pages_served: 0,
            throttle_after_pages: self.throttle_after_pages,
            retry_after: self.retry_after,
            matched,
        }))
    }

    async fn create(&self, product: &Product) -> StoreResult<()> {
        let _guard = self.enter_op().await;
        self.calls.creates.fetch_add(1, Ordering::Relaxed);
        self.outcome_for(&product.id)?;
        self.products
            .lock()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn current_max_id(&self) -> StoreResult<i64> {
        self.calls.max_id_queries.fetch_add(1, Ordering::Relaxed);
        let stored = self
            .products
            .lock()
            .await
            .values()
            .map(|p| p.numeric_id)
            .max()
            .unwrap_or(0);
        Ok(stored.max(self.base_max_id))
    }
}

struct MockPager {
    pages_left: usize,
    pages_served: usize,
    throttle_after_pages: Option<usize>,
    retry_after: Option<Duration>,
    matched: Option<Product>,
}

#[async_trait]
impl QueryPager for MockPager {
    async fn next_page(&mut self) -> StoreResult<Option<Vec<Product>>> {
        if let Some(limit) = self.throttle_after_pages {
            if self.pages_served >= limit {
                return Err(StoreError::RateLimited {
                    retry_after: self.retry_after,
                });
            }
        }
        if self.pages_left == 0 {
            return Ok(None);
        }
        self.pages_left -= 1;
        self.pages_served += 1;
        // Every page carries the match (or is empty); the page count is what
        // per-page accounting tests observe.
        Ok(Some(self.matched.clone().into_iter().collect()))
    }
}
