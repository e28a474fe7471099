//! Bulk-insert driver scenarios, including id sequencing.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use docstore_bench::testing::MockStore;
use docstore_bench::workload::{run_bulk_inserts, BulkInsertConfig};
use docstore_client::DocumentStore;
use loadtest_executor::WorkloadCounters;
use loadtest_products::ProductFactory;

#[tokio::test]
async fn inserts_continue_the_id_sequence() {
    let store = Arc::new(MockStore::new().with_current_max_id(5));
    let counters = Arc::new(WorkloadCounters::new());
    let config = BulkInsertConfig {
        total_docs: 3,
        max_concurrency: 2,
        seed: 42,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_bulk_inserts(dyn_store, Arc::clone(&counters), &config)
        .await
        .unwrap();

    let ids: Vec<i64> = store
        .stored_products()
        .await
        .iter()
        .map(|p| p.numeric_id)
        .collect();
    assert_eq!(ids, vec![6, 7, 8]);

    let delta = counters.creates().drain();
    assert_eq!(delta.succeeded, 3);
    assert_eq!(delta.throttled, 0);
}

#[tokio::test]
async fn sequencing_is_independent_of_worker_scheduling() {
    let store = Arc::new(MockStore::new().with_current_max_id(100));
    let counters = Arc::new(WorkloadCounters::new());
    let config = BulkInsertConfig {
        total_docs: 50,
        max_concurrency: 7,
        seed: 42,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_bulk_inserts(dyn_store, Arc::clone(&counters), &config)
        .await
        .unwrap();

    // No gaps, no duplicates, exactly 101..=150.
    let ids: Vec<i64> = store
        .stored_products()
        .await
        .iter()
        .map(|p| p.numeric_id)
        .collect();
    assert_eq!(ids, (101..=150).collect::<Vec<i64>>());
    assert_eq!(store.calls.max_id_queries.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn throttled_and_failed_creates_count_as_throttled() {
    // Id 7 is rate-limited, id 8 fails outright; both land in throttled and
    // neither aborts the batch.
    let store = Arc::new(
        MockStore::new()
            .with_current_max_id(5)
            .with_rate_limited_ids(["7"])
            .with_failing_ids(["8"]),
    );
    let counters = Arc::new(WorkloadCounters::new());
    let config = BulkInsertConfig {
        total_docs: 5,
        max_concurrency: 3,
        seed: 42,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_bulk_inserts(dyn_store, Arc::clone(&counters), &config)
        .await
        .unwrap();

    assert_eq!(store.calls.creates.load(Ordering::Relaxed), 5);
    let delta = counters.creates().drain();
    assert_eq!(delta.succeeded, 3);
    assert_eq!(delta.throttled, 2);

    let ids: Vec<i64> = store
        .stored_products()
        .await
        .iter()
        .map(|p| p.numeric_id)
        .collect();
    assert_eq!(ids, vec![6, 9, 10]);
}

#[tokio::test]
async fn inserts_append_after_existing_products() {
    let store = Arc::new(MockStore::new());
    store
        .seed_products(ProductFactory::new(1).generate_range(1, 4))
        .await;

    let counters = Arc::new(WorkloadCounters::new());
    let config = BulkInsertConfig {
        total_docs: 2,
        max_concurrency: 2,
        seed: 42,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_bulk_inserts(dyn_store, Arc::clone(&counters), &config)
        .await
        .unwrap();

    let ids: Vec<i64> = store
        .stored_products()
        .await
        .iter()
        .map(|p| p.numeric_id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}
