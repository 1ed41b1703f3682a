//! MongoDB-backed store. One client is created at startup and shared by every request;
//! the driver owns connection pooling.

use super::{DocumentStore, InsertOutcome, UpdateOutcome};
use crate::error::StoreError;
use crate::query::ListQuery;
use async_trait::async_trait;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::{Client, Collection, Database};

#[derive(Clone, Debug)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect to `uri` and scope all collections to `database`.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        tracing::info!(database = %database, "mongodb client created");
        Ok(Self::from_database(client.database(database)))
    }

    pub fn from_database(db: Database) -> Self {
        MongoStore { db }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError> {
        tracing::debug!(collection = %collection, filter = %query.filter, sort = ?query.sort, skip = ?query.skip, limit = ?query.limit, "find");
        let coll = self.collection(collection);
        let mut action = coll.find(query.filter.clone());
        if let Some(sort) = query.sort_document() {
            action = action.sort(sort);
        }
        if let Some(skip) = query.skip {
            action = action.skip(skip);
        }
        if let Some(limit) = query.limit {
            action = action.limit(limit);
        }
        let cursor = action.await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        tracing::debug!(collection = %collection, filter = %filter, "find_one");
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertOutcome, StoreError> {
        tracing::debug!(collection = %collection, "insert_one");
        let result = self.collection(collection).insert_one(doc).await?;
        let inserted_id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::UnexpectedId(result.inserted_id.to_string()))?;
        Ok(InsertOutcome { inserted_id })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        tracing::debug!(collection = %collection, filter = %filter, update = %update, "update_one");
        let result = self.collection(collection).update_one(filter, update).await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        tracing::debug!(collection = %collection, filter = %filter, "delete_one");
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
