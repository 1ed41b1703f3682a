//! Document persistence. Handlers talk to a [`DocumentStore`]; the MongoDB-backed store is used in
//! production and the in-memory store in tests and local runs.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::query::ListQuery;
use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use std::sync::Arc;

/// Outcome of an update: how many records matched the filter and how many actually changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Insert acknowledgement returned to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertOutcome {
    pub inserted_id: ObjectId,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find records in `collection` matching the query's filter, honouring sort, skip and limit.
    async fn find(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError>;

    /// Insert one record. The store assigns `_id` when the document has none.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertOutcome, StoreError>;

    /// Apply an update document (e.g. `{"$set": {...}}`) to the first record matching `filter`.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the first record matching `filter`. Returns the number deleted (0 or 1).
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    /// Round-trip to the backing database; used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Open the store described by the config. MongoDB connects once here; the returned handle is
/// shared by every request.
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config {
        StoreConfig::Mongo { uri, database } => Ok(Arc::new(MongoStore::connect(uri, database).await?)),
        StoreConfig::Memory => {
            tracing::warn!("using in-memory store; records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
