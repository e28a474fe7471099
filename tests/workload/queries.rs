//! Query driver scenarios, including per-page accounting.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use docstore_bench::testing::MockStore;
use docstore_bench::workload::{run_queries, QueryConfig};
use docstore_client::{DocumentStore, ThroughputBucket};
use loadtest_executor::WorkloadCounters;

#[tokio::test]
async fn single_page_queries_count_once_each() {
    let store = Arc::new(MockStore::new());
    let counters = Arc::new(WorkloadCounters::new());
    let config = QueryConfig {
        total_queries: 20,
        max_concurrency: 5,
        bucket: None,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_queries(dyn_store, Arc::clone(&counters), &config).await;

    assert_eq!(store.calls.queries.load(Ordering::Relaxed), 20);
    let delta = counters.queries().drain();
    assert_eq!(delta.succeeded, 20);
    assert_eq!(delta.throttled, 0);
}

#[tokio::test]
async fn paged_queries_count_once_per_page() {
    // One logical query over three pages increments succeeded three times.
    let store = Arc::new(MockStore::new().with_pages_per_query(3));
    let counters = Arc::new(WorkloadCounters::new());
    let config = QueryConfig {
        total_queries: 5,
        max_concurrency: 2,
        bucket: None,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_queries(dyn_store, Arc::clone(&counters), &config).await;

    let delta = counters.queries().drain();
    assert_eq!(delta.succeeded, 15);
    assert_eq!(delta.throttled, 0);
}

#[tokio::test]
async fn rate_limited_query_open_counts_one_throttle() {
    let store = Arc::new(MockStore::new().with_rate_limited_ids(["1", "2", "3"]));
    let counters = Arc::new(WorkloadCounters::new());
    let config = QueryConfig {
        total_queries: 10,
        max_concurrency: 4,
        bucket: None,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_queries(dyn_store, Arc::clone(&counters), &config).await;

    let delta = counters.queries().drain();
    assert_eq!(delta.succeeded, 7);
    assert_eq!(delta.throttled, 3);
}

#[tokio::test]
async fn mid_pagination_throttle_abandons_the_rest() {
    // Five pages configured, throttled after two: each query records two
    // page successes and exactly one throttle, then stops paginating.
    let store = Arc::new(
        MockStore::new()
            .with_pages_per_query(5)
            .with_throttle_after_pages(2),
    );
    let counters = Arc::new(WorkloadCounters::new());
    let config = QueryConfig {
        total_queries: 4,
        max_concurrency: 2,
        bucket: None,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_queries(dyn_store, Arc::clone(&counters), &config).await;

    let delta = counters.queries().drain();
    assert_eq!(delta.succeeded, 8);
    assert_eq!(delta.throttled, 4);
}

#[tokio::test]
async fn bucket_hint_does_not_change_accounting() {
    let store = Arc::new(MockStore::new());
    let counters = Arc::new(WorkloadCounters::new());
    let config = QueryConfig {
        total_queries: 10,
        max_concurrency: 5,
        bucket: Some(ThroughputBucket(1)),
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_queries(dyn_store, Arc::clone(&counters), &config).await;

    let delta = counters.queries().drain();
    assert_eq!(delta.succeeded, 10);
    assert_eq!(delta.throttled, 0);
}
