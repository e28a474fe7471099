//! Sustained filtered-query workload driver.

use std::sync::Arc;
use std::time::Instant;

use docstore_client::{DocumentStore, ThroughputBucket};
use loadtest_executor::{run_bounded, WorkloadCounters};

/// Query workload parameters, read-only for the duration of a run.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Queries per batch; keys are `1..=total_queries` stringified.
    pub total_queries: u64,
    /// Worker-pool size.
    pub max_concurrency: usize,
    /// Routing hint forwarded to the store when set.
    pub bucket: Option<ThroughputBucket>,
}

/// Run one batch of sustained filtered queries, draining every result page.
///
/// Accounting is per page: each drained page increments the query success
/// tally once, so a query whose result spans several pages contributes one
/// increment per page. A rate-limited page abandons the rest of the
/// pagination after counting a single throttle.
pub async fn run_queries(
    store: Arc<dyn DocumentStore>,
    counters: Arc<WorkloadCounters>,
    config: &QueryConfig,
) {
    let keys: Vec<String> = (1..=config.total_queries).map(|i| i.to_string()).collect();
    let bucket = config.bucket;
    let start = Instant::now();

    run_bounded(keys, config.max_concurrency, move |key| {
        let store = Arc::clone(&store);
        let counters = Arc::clone(&counters);
        async move {
            let mut pager = match store.query_by_id(&key, bucket).await {
                Ok(pager) => pager,
                Err(e) if e.is_rate_limited() => {
                    counters.queries().record_throttled();
                    tracing::debug!(
                        "[Throttled] query {key} - RetryAfter: {:?}",
                        e.retry_after()
                    );
                    return;
                }
                Err(e) => {
                    tracing::warn!("[Error] query {key} - {e}");
                    return;
                }
            };

            loop {
                match pager.next_page().await {
                    Ok(Some(_page)) => counters.queries().record_success(),
                    Ok(None) => break,
                    Err(e) if e.is_rate_limited() => {
                        counters.queries().record_throttled();
                        tracing::debug!(
                            "[Throttled] query {key} - RetryAfter: {:?}",
                            e.retry_after()
                        );
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("[Error] query {key} - {e}");
                        break;
                    }
                }
            }
        }
    })
    .await;

    tracing::info!(
        "All queries completed in {:.2} sec",
        start.elapsed().as_secs_f64()
    );
}
