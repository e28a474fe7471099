//! Sustained point-read workload driver.

use std::sync::Arc;
use std::time::Instant;

use docstore_client::DocumentStore;
use loadtest_executor::{run_bounded, WorkloadCounters};

/// Point-read workload parameters, read-only for the duration of a run.
#[derive(Debug, Clone)]
pub struct PointReadConfig {
    /// Point reads per batch; keys are `1..=total_reads` stringified.
    pub total_reads: u64,
    /// Worker-pool size.
    pub max_concurrency: usize,
}

/// Run one batch of sustained point reads through the bounded executor.
///
/// Rate-limited reads are counted and abandoned; any other failure is
/// logged and dropped without counting. Nothing here aborts the batch.
pub async fn run_point_reads(
    store: Arc<dyn DocumentStore>,
    counters: Arc<WorkloadCounters>,
    config: &PointReadConfig,
) {
    let keys: Vec<String> = (1..=config.total_reads).map(|i| i.to_string()).collect();
    let start = Instant::now();

    run_bounded(keys, config.max_concurrency, move |key| {
        let store = Arc::clone(&store);
        let counters = Arc::clone(&counters);
        async move {
            match store.point_read(&key).await {
                Ok(_) => counters.reads().record_success(),
                Err(e) if e.is_rate_limited() => {
                    counters.reads().record_throttled();
                    tracing::debug!("[Throttled] read {key} - RetryAfter: {:?}", e.retry_after());
                }
                Err(e) => tracing::warn!("[Error] read {key} - {e}"),
            }
        }
    })
    .await;

    tracing::info!(
        "All reads completed in {:.2} sec",
        start.elapsed().as_secs_f64()
    );
}
