//! MongoDB wire-protocol backend.

use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use loadtest_products::Product;
use mongodb::error::{CommandError, ErrorKind, WriteFailure};
use mongodb::{Client, Collection, Cursor};

use crate::error::{StoreError, StoreResult};
use crate::store::{DocumentStore, QueryPager, ThroughputBucket};

/// Command error code raised over the MongoDB wire protocol when a request
/// exceeds the capacity allocated to the collection.
const THROTTLE_ERROR_CODE: i32 = 16500;

/// Connection settings for [`MongoStore::connect`].
#[derive(Debug, Clone)]
pub struct MongoStoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub page_size: u32,
}

/// MongoDB-backed document store.
pub struct MongoStore {
    collection: Collection<Product>,
    page_size: u32,
}

impl MongoStore {
    /// Connect to the store and verify the server is reachable before any
    /// workload starts.
    pub async fn connect(config: &MongoStoreConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(&config.uri).await.map_err(classify)?;
        let database = client.database(&config.database);

        database.list_collection_names().await.map_err(classify)?;
        tracing::debug!(
            "connected to {}/{}",
            config.database,
            config.collection
        );

        Ok(Self {
            collection: database.collection(&config.collection),
            page_size: config.page_size.max(1),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn point_read(&self, id: &str) -> StoreResult<Option<Product>> {
        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(classify)
    }

    async fn query_by_id(
        &self,
        id: &str,
        bucket: Option<ThroughputBucket>,
    ) -> StoreResult<Box<dyn QueryPager>> {
        let mut find = self
            .collection
            .find(doc! { "id": id })
            .batch_size(self.page_size);
        if let Some(bucket) = bucket {
            // The bucket hint rides the operation comment, the per-request
            // metadata the wire protocol lets a front end route on.
            find = find.comment(Bson::String(format!("throughput-bucket={bucket}")));
        }

        let cursor = find.await.map_err(classify)?;
        Ok(Box::new(MongoPager {
            cursor,
            page_size: self.page_size as usize,
            exhausted: false,
        }))
    }

    async fn create(&self, product: &Product) -> StoreResult<()> {
        self.collection
            .insert_one(product)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn current_max_id(&self) -> StoreResult<i64> {
        let pipeline = vec![doc! {
            "$group": { "_id": Bson::Null, "maxId": { "$max": "$numericId" } }
        }];
        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(classify)?;

        match cursor.try_next().await.map_err(classify)? {
            Some(row) => scalar_max_id(&row),
            // No result row at all: the collection is empty.
            None => Ok(0),
        }
    }
}

struct MongoPager {
    cursor: Cursor<Product>,
    page_size: usize,
    exhausted: bool,
}

#[async_trait]
impl QueryPager for MongoPager {
    async fn next_page(&mut self) -> StoreResult<Option<Vec<Product>>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut page = Vec::with_capacity(self.page_size);
        while page.len() < self.page_size {
            match self.cursor.try_next().await.map_err(classify)? {
                Some(product) => page.push(product),
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        if page.is_empty() {
            Ok(None)
        } else {
            Ok(Some(page))
        }
    }
}

/// Map a driver error into the two-case store taxonomy.
fn classify(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Command(CommandError { code, message, .. })
            if *code == THROTTLE_ERROR_CODE =>
        {
            StoreError::RateLimited {
                retry_after: parse_retry_after(message),
            }
        }
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == THROTTLE_ERROR_CODE =>
        {
            StoreError::RateLimited {
                retry_after: parse_retry_after(&write_error.message),
            }
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

/// Extract the single scalar aggregate from a max-id result row. Null means
/// no document carried the field.
fn scalar_max_id(row: &Document) -> StoreResult<i64> {
    match row.get("maxId") {
        Some(Bson::Int64(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(i64::from(*v)),
        Some(Bson::Double(v)) => Ok(*v as i64),
        Some(Bson::Null) | None => Ok(0),
        Some(other) => Err(StoreError::Backend(format!(
            "unexpected maxId aggregate type: {other:?}"
        ))),
    }
}

/// Pull the `RetryAfterMs=<n>` hint out of a throttle message, when present.
fn parse_retry_after(message: &str) -> Option<Duration> {
    const MARKER: &str = "RetryAfterMs=";
    let start = message.find(MARKER)? + MARKER.len();
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u64>().ok().map(Duration::from_millis)
}
