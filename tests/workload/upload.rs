//! File-upload driver scenarios.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use docstore_bench::testing::MockStore;
use docstore_bench::workload::{run_file_upload, FileUploadConfig};
use docstore_client::DocumentStore;
use loadtest_executor::WorkloadCounters;
use loadtest_products::{write_products_jsonl, ProductFactory};

#[tokio::test]
async fn uploads_every_product_from_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.jsonl");

    // Pre-assigned ids; the upload path does no sequencing of its own.
    let products = ProductFactory::new(42).generate_range(11, 4);
    write_products_jsonl(&path, &products).unwrap();

    let store = Arc::new(MockStore::new());
    let counters = Arc::new(WorkloadCounters::new());
    let config = FileUploadConfig {
        path,
        max_concurrency: 2,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_file_upload(dyn_store, Arc::clone(&counters), &config)
        .await
        .unwrap();

    assert_eq!(store.calls.creates.load(Ordering::Relaxed), 4);
    assert_eq!(store.stored_products().await, products);

    let delta = counters.creates().drain();
    assert_eq!(delta.succeeded, 4);
    assert_eq!(delta.throttled, 0);
}

#[tokio::test]
async fn a_missing_file_fails_before_any_insert() {
    let store = Arc::new(MockStore::new());
    let counters = Arc::new(WorkloadCounters::new());
    let config = FileUploadConfig {
        path: "/nonexistent/products.jsonl".into(),
        max_concurrency: 2,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    let result = run_file_upload(dyn_store, Arc::clone(&counters), &config).await;

    assert!(result.is_err());
    assert_eq!(store.calls.creates.load(Ordering::Relaxed), 0);
    assert!(counters.creates().drain().is_zero());
}

#[tokio::test]
async fn throttled_uploads_are_counted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.jsonl");

    let products = ProductFactory::new(7).generate_range(1, 6);
    write_products_jsonl(&path, &products).unwrap();

    let store = Arc::new(MockStore::new().with_rate_limited_ids(["2", "5"]));
    let counters = Arc::new(WorkloadCounters::new());
    let config = FileUploadConfig {
        path,
        max_concurrency: 3,
    };

    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    run_file_upload(dyn_store, Arc::clone(&counters), &config)
        .await
        .unwrap();

    let delta = counters.creates().drain();
    assert_eq!(delta.succeeded, 4);
    assert_eq!(delta.throttled, 2);
}
