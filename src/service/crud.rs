//! Generic record operations against a DocumentStore.

use crate::config::COURSES_COLLECTION;
use crate::error::AppError;
use crate::query::{
    document_to_json, id_filter, insert_document, json_to_bson, parse_object_id, patch_document, set_update,
    ListQuery,
};
use crate::service::RequestValidator;
use crate::store::{DocumentStore, InsertOutcome, UpdateOutcome};
use bson::{oid::ObjectId, Document};
use serde_json::Value;

const INVENTORY_FIELD: &str = "availableInventory";

pub struct CollectionService;

impl CollectionService {
    /// Records matching the query, rendered as JSON. A limit of 0 yields nothing
    /// (the driver would read it as "unlimited").
    pub async fn list(store: &dyn DocumentStore, collection: &str, query: &ListQuery) -> Result<Vec<Value>, AppError> {
        if query.limit == Some(0) {
            return Ok(Vec::new());
        }
        let docs = store.find(collection, query).await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    /// Fetch one record by identifier.
    pub async fn read(store: &dyn DocumentStore, collection: &str, id: ObjectId) -> Result<Option<Value>, AppError> {
        let doc = store.find_one(collection, id_filter(id)).await?;
        Ok(doc.map(document_to_json))
    }

    /// Insert one record from a JSON object body; the store assigns the identifier.
    pub async fn create(store: &dyn DocumentStore, collection: &str, body: Value) -> Result<InsertOutcome, AppError> {
        let doc = insert_document(body)?;
        RequestValidator::validate(collection, &doc)?;
        let outcome = store.insert_one(collection, doc).await?;
        tracing::info!(collection = %collection, id = %outcome.inserted_id, "record inserted");
        Ok(outcome)
    }

    /// Merge the body's fields into the record. Fails with 404 when nothing was modified.
    pub async fn update(
        store: &dyn DocumentStore,
        collection: &str,
        id: ObjectId,
        body: Value,
    ) -> Result<UpdateOutcome, AppError> {
        let patch = patch_document(body)?;
        RequestValidator::validate(collection, &patch)?;
        let outcome = store.update_one(collection, id_filter(id), set_update(patch)).await?;
        Self::require_modified(collection, id, outcome)
    }

    /// Delete by identifier. Fails with 404 when no record was removed.
    pub async fn delete(store: &dyn DocumentStore, collection: &str, id: ObjectId) -> Result<(), AppError> {
        let deleted = store.delete_one(collection, id_filter(id)).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Record not found".into()));
        }
        tracing::info!(collection = %collection, id = %id, "record deleted");
        Ok(())
    }

    /// Set a course's inventory. The value is validated before any store access and written
    /// with a single update, so there is no separate check-then-write step.
    pub async fn update_inventory(
        store: &dyn DocumentStore,
        course_id: &str,
        inventory: &Value,
    ) -> Result<UpdateOutcome, AppError> {
        let value = json_to_bson(inventory)?;
        RequestValidator::validate_value(COURSES_COLLECTION, INVENTORY_FIELD, &value)?;
        let id = parse_object_id(course_id)?;
        let mut set = Document::new();
        set.insert(INVENTORY_FIELD, value);
        let outcome = store.update_one(COURSES_COLLECTION, id_filter(id), set_update(set)).await?;
        Self::require_modified(COURSES_COLLECTION, id, outcome)
    }

    /// Both "no such record" and "nothing changed" answer 404; the log tells them apart.
    fn require_modified(collection: &str, id: ObjectId, outcome: UpdateOutcome) -> Result<UpdateOutcome, AppError> {
        if outcome.modified == 0 {
            if outcome.matched == 0 {
                tracing::debug!(collection = %collection, id = %id, "update matched no record");
            } else {
                tracing::debug!(collection = %collection, id = %id, "update left record unchanged");
            }
            return Err(AppError::NotFound("Record not found".into()));
        }
        tracing::info!(collection = %collection, id = %id, "record updated");
        Ok(outcome)
    }
}
