//! Point-read driver scenarios.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use docstore_bench::testing::MockStore;
use docstore_bench::workload::{run_point_reads, PointReadConfig};
use docstore_client::DocumentStore;
use loadtest_executor::WorkloadCounters;

#[tokio::test]
async fn all_reads_succeed() {
    let store = Arc::new(MockStore::new());
    let counters = Arc::new(WorkloadCounters::new());
    let config = PointReadConfig {
        total_reads: 100,
        max_concurrency: 10,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_point_reads(dyn_store, Arc::clone(&counters), &config).await;

    assert_eq!(store.calls.point_reads.load(Ordering::Relaxed), 100);
    let delta = counters.reads().drain();
    assert_eq!(delta.succeeded, 100);
    assert_eq!(delta.throttled, 0);
}

#[tokio::test]
async fn rate_limited_reads_are_counted_not_raised() {
    let store = Arc::new(
        MockStore::new()
            .with_rate_limited_ids((1..=10).map(|i| i.to_string()))
            .with_retry_after(Duration::from_millis(34)),
    );
    let counters = Arc::new(WorkloadCounters::new());
    let config = PointReadConfig {
        total_reads: 50,
        max_concurrency: 5,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_point_reads(dyn_store, Arc::clone(&counters), &config).await;

    assert_eq!(store.calls.point_reads.load(Ordering::Relaxed), 50);
    let delta = counters.reads().drain();
    assert_eq!(delta.succeeded, 40);
    assert_eq!(delta.throttled, 10);
}

#[tokio::test]
async fn generic_failures_are_dropped_without_counting() {
    let store = Arc::new(MockStore::new().with_failing_ids(["3", "4"]));
    let counters = Arc::new(WorkloadCounters::new());
    let config = PointReadConfig {
        total_reads: 10,
        max_concurrency: 4,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_point_reads(dyn_store, Arc::clone(&counters), &config).await;

    // Failed reads are logged and dropped: neither succeeded nor throttled.
    assert_eq!(store.calls.point_reads.load(Ordering::Relaxed), 10);
    let delta = counters.reads().drain();
    assert_eq!(delta.succeeded, 8);
    assert_eq!(delta.throttled, 0);
}

#[tokio::test]
async fn reads_respect_the_concurrency_bound() {
    let store = Arc::new(MockStore::new().with_op_delay(Duration::from_millis(2)));
    let counters = Arc::new(WorkloadCounters::new());
    let config = PointReadConfig {
        total_reads: 40,
        max_concurrency: 8,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_point_reads(dyn_store, Arc::clone(&counters), &config).await;

    let observed = store.max_in_flight();
    assert!(observed <= 8, "observed {observed} reads in flight");
    assert!(observed >= 2, "pool never ran concurrently");
}
