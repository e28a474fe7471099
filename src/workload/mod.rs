//! Workload drivers, stats reporting, and run orchestration.
//!
//! Each driver turns a logical workload ("N reads", "M inserts") into a
//! batch of concurrent store operations through the bounded executor,
//! recording every outcome into the shared counters. The reporter drains
//! the counters once a second; the orchestrator repeats driver batches
//! until the configured wall-clock duration elapses.

pub mod inserts;
pub mod queries;
pub mod reads;
pub mod reporter;
pub mod run;

pub use inserts::{run_bulk_inserts, run_file_upload, BulkInsertConfig, FileUploadConfig};
pub use queries::{run_queries, QueryConfig};
pub use reads::{run_point_reads, PointReadConfig};
pub use reporter::{ReporterHandle, RunTotals, StatsReporter};
pub use run::{run_once, run_until_deadline, RunConfig};
