//! Command-line interface for docstore-bench
//!
//! # Usage Examples
//!
//! ```bash
//! # Sustained point reads and filtered queries for five minutes, with
//! # queries isolated on a dedicated throughput bucket
//! docstore-bench sustained \
//!   --uri mongodb://localhost:27017 \
//!   --total-reads 10000 --max-read-concurrency 100 \
//!   --total-queries 1000 --max-query-concurrency 50 \
//!   --use-throughput-bucket \
//!   --run-duration 5m
//!
//! # Sustained point reads alongside sequenced bulk inserts
//! docstore-bench bulk \
//!   --uri mongodb://localhost:27017 \
//!   --total-reads 10000 --total-inserts 1000 \
//!   --max-concurrency 100 \
//!   --run-duration 5m
//!
//! # Generate a product catalog, then drive it through the insert path
//! docstore-bench generate --count 5000 --seed 42 --out products.jsonl
//! docstore-bench upload --uri mongodb://localhost:27017 --file products.jsonl
//! ```
//!
//! Connection settings also come from the environment: `DOCSTORE_URI`,
//! `DOCSTORE_DATABASE`, `DOCSTORE_COLLECTION`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use docstore_bench::config::parse_run_duration;
use docstore_bench::workload::{
    run_bulk_inserts, run_file_upload, run_once, run_point_reads, run_queries,
    run_until_deadline, BulkInsertConfig, FileUploadConfig, PointReadConfig, QueryConfig,
    RunConfig, StatsReporter,
};
use docstore_bench::StoreOpts;
use docstore_client::{DocumentStore, MongoStore, MongoStoreConfig, ThroughputBucket};
use loadtest_executor::{OpKind, WorkloadCounters};
use loadtest_products::{write_products_jsonl, ProductFactory};

#[derive(Parser)]
#[command(name = "docstore-bench")]
#[command(about = "Sustained load generator and throttling benchmark for remote document stores")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sustained point reads and filtered queries until the duration elapses
    Sustained {
        #[command(flatten)]
        store: StoreOpts,

        /// Point reads per batch
        #[arg(long, default_value = "10000")]
        total_reads: u64,

        /// Queries per batch
        #[arg(long, default_value = "1000")]
        total_queries: u64,

        /// Read worker-pool size
        #[arg(long, default_value = "100")]
        max_read_concurrency: usize,

        /// Query worker-pool size
        #[arg(long, default_value = "50")]
        max_query_concurrency: usize,

        /// Tag queries with a dedicated throughput bucket
        #[arg(long)]
        use_throughput_bucket: bool,

        /// Bucket id used when --use-throughput-bucket is set
        #[arg(long, default_value = "1")]
        throughput_bucket: u32,

        /// Wall-clock run duration ("300", "300s", "30m", "1h")
        #[arg(long, default_value = "1m")]
        run_duration: String,

        /// Pause between batches, in milliseconds
        #[arg(long, default_value = "100")]
        batch_pause_ms: u64,
    },

    /// Sustained point reads alongside sequenced bulk inserts
    Bulk {
        #[command(flatten)]
        store: StoreOpts,

        /// Point reads per batch
        #[arg(long, default_value = "10000")]
        total_reads: u64,

        /// Documents inserted per batch
        #[arg(long, default_value = "1000")]
        total_inserts: u64,

        /// Worker-pool size for reads and inserts
        #[arg(long, default_value = "100")]
        max_concurrency: usize,

        /// Factory seed for the generated product fields
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Wall-clock run duration ("300", "300s", "30m", "1h")
        #[arg(long, default_value = "1m")]
        run_duration: String,

        /// Pause between batches, in milliseconds
        #[arg(long, default_value = "100")]
        batch_pause_ms: u64,
    },

    /// Insert pre-generated products from a JSONL file (one shot)
    Upload {
        #[command(flatten)]
        store: StoreOpts,

        /// JSONL file with one product per line
        #[arg(long)]
        file: PathBuf,

        /// Worker-pool size
        #[arg(long, default_value = "100")]
        max_concurrency: usize,
    },

    /// Write a JSONL file of factory products for later upload
    Generate {
        /// Number of products to generate
        #[arg(long, default_value = "1000")]
        count: u64,

        /// First numeric id in the sequence
        #[arg(long, default_value = "1")]
        start_id: i64,

        /// Factory seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output path
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn connect(opts: &StoreOpts) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store = MongoStore::connect(&MongoStoreConfig {
        uri: opts.uri.clone(),
        database: opts.database.clone(),
        collection: opts.collection.clone(),
        page_size: opts.page_size,
    })
    .await
    .context("failed to connect to the document store")?;
    Ok(Arc::new(store))
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sustained {
            store,
            total_reads,
            total_queries,
            max_read_concurrency,
            max_query_concurrency,
            use_throughput_bucket,
            throughput_bucket,
            run_duration,
            batch_pause_ms,
        } => {
            let duration = parse_run_duration(&run_duration).context("invalid --run-duration")?;
            let store = connect(&store).await?;
            let counters = Arc::new(WorkloadCounters::new());

            let read_config = PointReadConfig {
                total_reads,
                max_concurrency: max_read_concurrency,
            };
            let query_config = QueryConfig {
                total_queries,
                max_concurrency: max_query_concurrency,
                bucket: use_throughput_bucket.then_some(ThroughputBucket(throughput_bucket)),
            };
            if query_config.bucket.is_some() {
                tracing::info!("Queries tagged with throughput bucket {throughput_bucket}.");
            }

            let reporter =
                StatsReporter::new(Arc::clone(&counters), &[OpKind::Read, OpKind::Query]);
            let mut run_config = RunConfig::new(duration);
            run_config.batch_pause = Duration::from_millis(batch_pause_ms);

            run_until_deadline(reporter, &run_config, || {
                let store = Arc::clone(&store);
                let counters = Arc::clone(&counters);
                let read_config = read_config.clone();
                let query_config = query_config.clone();
                async move {
                    tokio::join!(
                        run_point_reads(Arc::clone(&store), Arc::clone(&counters), &read_config),
                        run_queries(store, counters, &query_config),
                    );
                    Ok(())
                }
            })
            .await?;
        }

        Commands::Bulk {
            store,
            total_reads,
            total_inserts,
            max_concurrency,
            seed,
            run_duration,
            batch_pause_ms,
        } => {
            let duration = parse_run_duration(&run_duration).context("invalid --run-duration")?;
            let store = connect(&store).await?;
            let counters = Arc::new(WorkloadCounters::new());

            let read_config = PointReadConfig {
                total_reads,
                max_concurrency,
            };
            let insert_config = BulkInsertConfig {
                total_docs: total_inserts,
                max_concurrency,
                seed,
            };

            let reporter =
                StatsReporter::new(Arc::clone(&counters), &[OpKind::Read, OpKind::Create]);
            let mut run_config = RunConfig::new(duration);
            run_config.batch_pause = Duration::from_millis(batch_pause_ms);

            run_until_deadline(reporter, &run_config, || {
                let store = Arc::clone(&store);
                let counters = Arc::clone(&counters);
                let read_config = read_config.clone();
                let insert_config = insert_config.clone();
                async move {
                    tracing::info!("Running bulk workload...");
                    let (_, inserted) = tokio::join!(
                        run_point_reads(Arc::clone(&store), Arc::clone(&counters), &read_config),
                        run_bulk_inserts(store, counters, &insert_config),
                    );
                    inserted?;
                    tracing::info!("Bulk workload completed.");
                    Ok(())
                }
            })
            .await?;
        }

        Commands::Upload {
            store,
            file,
            max_concurrency,
        } => {
            let store = connect(&store).await?;
            let counters = Arc::new(WorkloadCounters::new());
            let reporter = StatsReporter::new(Arc::clone(&counters), &[OpKind::Create]);

            let config = FileUploadConfig {
                path: file,
                max_concurrency,
            };
            run_once(reporter, run_file_upload(store, counters, &config)).await?;
        }

        Commands::Generate {
            count,
            start_id,
            seed,
            out,
        } => {
            let mut factory = ProductFactory::new(seed);
            let products = factory.generate_range(start_id, count);
            write_products_jsonl(&out, &products)
                .with_context(|| format!("failed to write products to {out:?}"))?;
            tracing::info!(
                "Wrote {count} products to {out:?} (ids {start_id}..={}).",
                start_id + count as i64 - 1
            );
        }
    }

    Ok(())
}
