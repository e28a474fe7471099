//! Bulk-insert workload drivers: factory-sequenced inserts and
//! pre-generated file upload.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use docstore_client::DocumentStore;
use loadtest_executor::{run_bounded, WorkloadCounters};
use loadtest_products::{read_products_jsonl, Product, ProductFactory};

/// Bulk-insert workload parameters, read-only for the duration of a run.
#[derive(Debug, Clone)]
pub struct BulkInsertConfig {
    /// Documents inserted per batch.
    pub total_docs: u64,
    /// Worker-pool size.
    pub max_concurrency: usize,
    /// Factory seed for the generated product fields.
    pub seed: u64,
}

/// Run one bulk-insert batch.
///
/// Queries the store's current maximum numeric id, generates products with
/// ids `max+1 ..= max+total_docs` (contiguous, no gaps or duplicates
/// regardless of worker scheduling), and inserts each through the bounded
/// executor. Rate-limited and failed creates both count as throttled.
///
/// Only the max-id query can fail the batch; per-item outcomes never do.
pub async fn run_bulk_inserts(
    store: Arc<dyn DocumentStore>,
    counters: Arc<WorkloadCounters>,
    config: &BulkInsertConfig,
) -> anyhow::Result<()> {
    let max_id = store
        .current_max_id()
        .await
        .context("failed to query the current max id")?;
    tracing::info!(
        "Max id found: {max_id}. Starting bulk insert from {} to {}.",
        max_id + 1,
        max_id + config.total_docs as i64
    );

    let mut factory = ProductFactory::new(config.seed);
    let products = factory.generate_range(max_id + 1, config.total_docs);

    insert_products(store, counters, products, config.max_concurrency).await;
    tracing::info!("Bulk insert completed for {} documents.", config.total_docs);
    Ok(())
}

/// File-upload workload parameters.
#[derive(Debug, Clone)]
pub struct FileUploadConfig {
    /// JSONL file with one product per line.
    pub path: PathBuf,
    /// Worker-pool size.
    pub max_concurrency: usize,
}

/// Insert pre-generated products from a JSONL file through the same bounded
/// path as the sequenced bulk insert. Ids are taken as-is; no sequencing.
pub async fn run_file_upload(
    store: Arc<dyn DocumentStore>,
    counters: Arc<WorkloadCounters>,
    config: &FileUploadConfig,
) -> anyhow::Result<()> {
    let products = read_products_jsonl(&config.path)
        .with_context(|| format!("failed to read products from {:?}", config.path))?;
    let total = products.len();
    tracing::info!("Uploading {total} products from {:?}", config.path);

    insert_products(store, counters, products, config.max_concurrency).await;
    tracing::info!("Upload completed for {total} documents.");
    Ok(())
}

async fn insert_products(
    store: Arc<dyn DocumentStore>,
    counters: Arc<WorkloadCounters>,
    products: Vec<Product>,
    max_concurrency: usize,
) {
    let start = Instant::now();

    run_bounded(products, max_concurrency, move |product| {
        let store = Arc::clone(&store);
        let counters = Arc::clone(&counters);
        async move {
            match store.create(&product).await {
                Ok(()) => counters.creates().record_success(),
                Err(e) if e.is_rate_limited() => {
                    counters.creates().record_throttled();
                    tracing::debug!(
                        "[Throttled] create {} - RetryAfter: {:?}",
                        product.id,
                        e.retry_after()
                    );
                }
                Err(e) => {
                    // Failed creates count with throttles; the batch keeps going.
                    counters.creates().record_throttled();
                    tracing::warn!("[Error] create {} - {e}", product.id);
                }
            }
        }
    })
    .await;

    tracing::info!(
        "All inserts completed in {:.2} sec",
        start.elapsed().as_secs_f64()
    );
}
