//! Deadline loop behavior.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use docstore_bench::workload::{run_once, run_until_deadline, RunConfig, StatsReporter};
use loadtest_executor::{OpKind, WorkloadCounters};

#[tokio::test]
async fn batches_repeat_until_the_deadline() {
    let counters = Arc::new(WorkloadCounters::new());
    let reporter = StatsReporter::new(Arc::clone(&counters), &[OpKind::Read])
        .with_interval(Duration::from_millis(20));

    let mut config = RunConfig::new(Duration::from_millis(120));
    config.batch_pause = Duration::from_millis(5);

    let batches = Arc::new(AtomicU64::new(0));
    let totals = run_until_deadline(reporter, &config, || {
        let counters = Arc::clone(&counters);
        let batches = Arc::clone(&batches);
        async move {
            batches.fetch_add(1, Ordering::Relaxed);
            counters.reads().record_success();
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(())
        }
    })
    .await
    .unwrap();

    let launched = batches.load(Ordering::Relaxed);
    assert!(launched >= 2, "only {launched} batches ran");
    assert_eq!(totals.kind(OpKind::Read).succeeded, launched);
}

#[tokio::test]
async fn a_failing_batch_still_joins_the_reporter() {
    let counters = Arc::new(WorkloadCounters::new());
    let reporter = StatsReporter::new(Arc::clone(&counters), &[OpKind::Read])
        .with_interval(Duration::from_secs(60));

    let config = RunConfig::new(Duration::from_secs(60));

    let result = run_until_deadline(reporter, &config, || {
        let counters = Arc::clone(&counters);
        async move {
            counters.reads().record_success();
            anyhow::bail!("store unreachable")
        }
    })
    .await;

    assert!(result.is_err());
    // The reporter was stopped and drained on the error path.
    assert!(counters.reads().drain().is_zero());
}

#[tokio::test]
async fn run_once_returns_the_batch_totals() {
    let counters = Arc::new(WorkloadCounters::new());
    let reporter = StatsReporter::new(Arc::clone(&counters), &[OpKind::Create])
        .with_interval(Duration::from_secs(60));

    let totals = run_once(reporter, {
        let counters = Arc::clone(&counters);
        async move {
            for _ in 0..4 {
                counters.creates().record_success();
            }
            counters.creates().record_throttled();
            Ok(())
        }
    })
    .await
    .unwrap();

    assert_eq!(totals.kind(OpKind::Create).succeeded, 4);
    assert_eq!(totals.kind(OpKind::Create).throttled, 1);
}
