//! docstore-bench library
//!
//! Workload drivers, stats reporting, and run orchestration for sustained
//! document-store load generation. The CLI in `main.rs` wires scenarios to
//! these modules:
//!
//! - Store access goes through the `docstore-client` trait seam.
//! - Counters and the bounded worker pool live in `loadtest-executor`.
//! - Synthetic entities come from `loadtest-products`.
//!
//! # CLI Usage
//!
//! ```bash
//! # Sustained point reads and bucket-tagged queries for five minutes
//! docstore-bench sustained --uri mongodb://localhost:27017 \
//!   --total-reads 10000 --total-queries 1000 \
//!   --use-throughput-bucket --run-duration 5m
//!
//! # Point reads alongside sequenced bulk inserts
//! docstore-bench bulk --uri mongodb://localhost:27017 \
//!   --total-reads 10000 --total-inserts 1000 --run-duration 5m
//!
//! # Upload a pre-generated product catalog
//! docstore-bench generate --count 5000 --out products.jsonl
//! docstore-bench upload --uri mongodb://localhost:27017 --file products.jsonl
//! ```

use clap::Args;

pub mod config;
pub mod testing;
pub mod workload;

/// Store connection options shared by all online commands.
#[derive(Args, Clone, Debug)]
pub struct StoreOpts {
    /// Store connection string
    #[arg(long, env = "DOCSTORE_URI")]
    pub uri: String,

    /// Database holding the benchmark collection
    #[arg(long, env = "DOCSTORE_DATABASE", default_value = "retail")]
    pub database: String,

    /// Collection receiving the workload
    #[arg(long, env = "DOCSTORE_COLLECTION", default_value = "products")]
    pub collection: String,

    /// Documents per query result page
    #[arg(long, default_value = "100")]
    pub page_size: u32,
}
