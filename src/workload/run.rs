//! Deadline-gated workload orchestration.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::workload::reporter::{RunTotals, StatsReporter};

/// Outer run-loop parameters.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Wall-clock window for launching new batches.
    pub duration: Duration,
    /// Pause between batches.
    pub batch_pause: Duration,
}

impl RunConfig {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            batch_pause: Duration::from_millis(100),
        }
    }
}

/// Repeatedly run `batch` until the configured duration elapses, reporting
/// stats throughout, then return the lifetime totals.
///
/// The deadline is checked only between batches; an in-flight batch always
/// runs to completion. The reporter is cancelled and joined before this
/// returns - on the error path too - so the final summary is never lost.
pub async fn run_until_deadline<F, Fut>(
    reporter: StatsReporter,
    config: &RunConfig,
    mut batch: F,
) -> anyhow::Result<RunTotals>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let handle = reporter.spawn();
    let start = Instant::now();

    let run_result = async {
        while start.elapsed() < config.duration {
            batch().await?;
            tokio::time::sleep(config.batch_pause).await;
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    if run_result.is_ok() {
        tracing::info!("All sustained operations completed.");
    }

    let totals = handle.stop().await?;
    run_result?;
    Ok(totals)
}

/// Run a single one-shot batch with stats reporting, no deadline loop.
pub async fn run_once<Fut>(reporter: StatsReporter, batch: Fut) -> anyhow::Result<RunTotals>
where
    Fut: Future<Output = anyhow::Result<()>>,
{
    let handle = reporter.spawn();
    let run_result = batch.await;
    let totals = handle.stop().await?;
    run_result?;
    Ok(totals)
}
