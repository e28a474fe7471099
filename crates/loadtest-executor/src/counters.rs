//! Atomic per-operation-kind success/throttle tallies.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The kinds of store operations tracked during a workload run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Read,
    Query,
    Create,
}

impl OpKind {
    /// Every kind, in reporting order.
    pub const ALL: [OpKind; 3] = [OpKind::Read, OpKind::Query, OpKind::Create];
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Read => write!(f, "Reads"),
            OpKind::Query => write!(f, "Queries"),
            OpKind::Create => write!(f, "Inserts"),
        }
    }
}

/// Succeeded/throttled tallies for one operation kind.
///
/// Incremented concurrently by worker tasks and drained by a single reader.
/// The drain is an atomic swap, so each increment lands in exactly one
/// drained delta - never lost, never double-counted across a tick boundary.
#[derive(Debug, Default)]
pub struct OpCounter {
    succeeded: AtomicU64,
    throttled: AtomicU64,
}

impl OpCounter {
    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_throttled(&self) {
        self.throttled.fetch_add(1, Ordering::Relaxed);
    }

    /// Atomically read and reset both tallies.
    pub fn drain(&self) -> OpDelta {
        OpDelta {
            succeeded: self.succeeded.swap(0, Ordering::Relaxed),
            throttled: self.throttled.swap(0, Ordering::Relaxed),
        }
    }
}

/// Tallies drained from an [`OpCounter`] over one reporting interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpDelta {
    pub succeeded: u64,
    pub throttled: u64,
}

impl OpDelta {
    pub fn is_zero(&self) -> bool {
        self.succeeded == 0 && self.throttled == 0
    }

    pub fn add(&mut self, other: OpDelta) {
        self.succeeded += other.succeeded;
        self.throttled += other.throttled;
    }
}

/// One [`OpCounter`] per operation kind.
///
/// Created once per run and shared (via `Arc`) between the workload drivers
/// that increment it and the stats reporter that drains it. There is no
/// process-wide counter state.
#[derive(Debug, Default)]
pub struct WorkloadCounters {
    reads: OpCounter,
    queries: OpCounter,
    creates: OpCounter,
}

impl WorkloadCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> &OpCounter {
        &self.reads
    }

    pub fn queries(&self) -> &OpCounter {
        &self.queries
    }

    pub fn creates(&self) -> &OpCounter {
        &self.creates
    }

    pub fn kind(&self, kind: OpKind) -> &OpCounter {
        match kind {
            OpKind::Read => &self.reads,
            OpKind::Query => &self.queries,
            OpKind::Create => &self.creates,
        }
    }
}
