//! In-memory store with the same observable semantics as the MongoDB store for the operations
//! the service issues: exact-match filters, single-field sort, skip/limit, `$set` updates.

use super::{DocumentStore, InsertOutcome, UpdateOutcome};
use crate::error::StoreError;
use crate::query::{ListQuery, SortDirection};
use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        let mut docs: Vec<Document> = guard
            .get(collection)
            .map(|all| all.iter().filter(|d| matches(d, &query.filter)).cloned().collect())
            .unwrap_or_default();
        drop(guard);

        if let Some((field, dir)) = &query.sort {
            docs.sort_by(|a, b| {
                let ord = compare_bson(a.get(field), b.get(field));
                match dir {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        let skip = query.skip.unwrap_or(0) as usize;
        // limit 0 means "no limit", as in MongoDB.
        let limit = match query.limit {
            Some(n) if n > 0 => n as usize,
            _ => usize::MAX,
        };
        Ok(docs.into_iter().skip(skip).take(limit).collect())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard
            .get(collection)
            .and_then(|all| all.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<InsertOutcome, StoreError> {
        let inserted_id = match doc.get("_id") {
            Some(Bson::ObjectId(oid)) => *oid,
            Some(other) => return Err(StoreError::UnexpectedId(other.to_string())),
            None => {
                let oid = ObjectId::new();
                let mut with_id = Document::new();
                with_id.insert("_id", oid);
                for (k, v) in doc {
                    with_id.insert(k, v);
                }
                doc = with_id;
                oid
            }
        };
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        guard.entry(collection.to_string()).or_default().push(doc);
        Ok(InsertOutcome { inserted_id })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        if let Some(op) = update.keys().find(|k| k.as_str() != "$set") {
            return Err(StoreError::Unsupported(format!("update operator {}", op)));
        }
        let set = match update.get("$set") {
            Some(Bson::Document(d)) => d.clone(),
            _ => return Err(StoreError::Unsupported("update without $set".into())),
        };
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|all| all.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(UpdateOutcome::default());
        };
        let mut changed = false;
        for (k, v) in set {
            if doc.get(&k) != Some(&v) {
                doc.insert(k, v);
                changed = true;
            }
        }
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        let Some(all) = guard.get_mut(collection) else {
            return Ok(0);
        };
        match all.iter().position(|d| matches(d, &filter)) {
            Some(i) => {
                all.remove(i);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(k, want)| doc.get(k).map(|have| bson_eq(have, want)).unwrap_or(false))
}

fn as_number(v: &Bson) -> Option<f64> {
    match v {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Numbers compare by value across Int32/Int64/Double; everything else structurally.
fn bson_eq(a: &Bson, b: &Bson) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Cross-type ordering: missing/null, numbers, strings, documents, arrays, ObjectIds, booleans, dates.
fn type_rank(v: Option<&Bson>) -> u8 {
    match v {
        None | Some(Bson::Null) => 0,
        Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_)) => 1,
        Some(Bson::String(_)) => 2,
        Some(Bson::Document(_)) => 3,
        Some(Bson::Array(_)) => 4,
        Some(Bson::ObjectId(_)) => 5,
        Some(Bson::Boolean(_)) => 6,
        Some(Bson::DateTime(_)) => 7,
        Some(_) => 8,
    }
}

fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank != Ordering::Equal {
        return rank;
    }
    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.bytes().cmp(&y.bytes()),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(x), Some(y)) => match (as_number(x), as_number(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}
