//! Per-second stats reporting.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use loadtest_executor::{OpDelta, OpKind, WorkloadCounters};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Lifetime totals accumulated by the reporter across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    reads: OpDelta,
    queries: OpDelta,
    creates: OpDelta,
}

impl RunTotals {
    pub fn kind(&self, kind: OpKind) -> OpDelta {
        match kind {
            OpKind::Read => self.reads,
            OpKind::Query => self.queries,
            OpKind::Create => self.creates,
        }
    }

    fn kind_mut(&mut self, kind: OpKind) -> &mut OpDelta {
        match kind {
            OpKind::Read => &mut self.reads,
            OpKind::Query => &mut self.queries,
            OpKind::Create => &mut self.creates,
        }
    }
}

/// Ticks on a fixed interval, drains the observed counters, logs a
/// per-second rate line, and accumulates lifetime totals until cancelled.
///
/// The reporter is the only reader of the counters it observes; each drain
/// is an atomic read-and-reset, so the per-tick delta is exactly what
/// landed since the previous tick.
pub struct StatsReporter {
    counters: Arc<WorkloadCounters>,
    kinds: Vec<OpKind>,
    interval: Duration,
}

impl StatsReporter {
    pub fn new(counters: Arc<WorkloadCounters>, kinds: &[OpKind]) -> Self {
        Self {
            counters,
            kinds: kinds.to_vec(),
            interval: Duration::from_secs(1),
        }
    }

    /// Override the reporting interval (1 second by default).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Spawn the reporting task.
    ///
    /// The returned handle cancels the task and yields the lifetime totals;
    /// await [`ReporterHandle::stop`] before the process exits or the final
    /// summary is lost.
    pub fn spawn(self) -> ReporterHandle {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(self.run(shutdown_rx));
        ReporterHandle {
            shutdown: shutdown_tx,
            handle,
        }
    }

    async fn run(self, mut shutdown: broadcast::Receiver<()>) -> RunTotals {
        let mut totals = RunTotals::default();
        // First tick fires one full interval after spawn.
        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + self.interval,
            self.interval,
        );

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    let deltas = self.drain_into(&mut totals);
                    tracing::info!("{}", rate_line(&deltas));
                }
            }
        }

        // One more drain on the way out so increments that landed after the
        // last tick still reach the summary. Still a single reader.
        self.drain_into(&mut totals);

        tracing::info!("Run summary:");
        for &kind in &self.kinds {
            let total = totals.kind(kind);
            tracing::info!(
                "  {kind}: {} succeeded, {} throttled",
                total.succeeded,
                total.throttled
            );
        }

        totals
    }

    fn drain_into(&self, totals: &mut RunTotals) -> Vec<(OpKind, OpDelta)> {
        self.kinds
            .iter()
            .map(|&kind| {
                let delta = self.counters.kind(kind).drain();
                totals.kind_mut(kind).add(delta);
                (kind, delta)
            })
            .collect()
    }
}

/// Handle to a spawned [`StatsReporter`].
pub struct ReporterHandle {
    shutdown: broadcast::Sender<()>,
    handle: JoinHandle<RunTotals>,
}

impl ReporterHandle {
    /// Signal cancellation and wait for the final summary. The reporter
    /// observes the signal within one tick.
    pub async fn stop(self) -> anyhow::Result<RunTotals> {
        // The receiver is gone only if the task already exited; either way
        // the join below settles.
        let _ = self.shutdown.send(());
        self.handle.await.context("stats reporter task failed")
    }
}

fn rate_line(deltas: &[(OpKind, OpDelta)]) -> String {
    deltas
        .iter()
        .map(|(kind, delta)| {
            format!(
                "{kind}/sec: {}, {kind} Throttled/sec: {}",
                delta.succeeded, delta.throttled
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
