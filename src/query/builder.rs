//! Builds filter, sort, and update documents from request input.

use crate::error::AppError;
use crate::query::params::{json_object_to_document, query_value_to_bson};
use bson::{doc, oid::ObjectId, Document};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Reserved query parameter names; everything else is an exact-match filter.
const LIMIT_PARAM: &str = "limit";
const SKIP_PARAM: &str = "skip";

/// Parse a path identifier into an ObjectId. Every identifier-keyed route goes through here.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Only the exact token `desc` sorts descending; anything else is ascending.
    pub fn from_token(token: &str) -> Self {
        if token == "desc" {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// A find request: filter plus optional sort, skip and limit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub filter: Document,
    pub sort: Option<(String, SortDirection)>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Every record, unfiltered and unbounded.
    pub fn all() -> Self {
        ListQuery::default()
    }

    /// Build from query-string parameters: `limit` and `skip` page the result, any other
    /// parameter is an exact-match filter on that field.
    pub fn from_params(params: HashMap<String, String>) -> Result<Self, AppError> {
        let mut q = ListQuery::default();
        let mut keys: Vec<_> = params.keys().cloned().collect();
        keys.sort();
        for k in keys {
            let v = &params[&k];
            match k.as_str() {
                LIMIT_PARAM => {
                    let n: u32 = v
                        .parse()
                        .map_err(|_| AppError::BadRequest(format!("limit must be a non-negative integer, got '{}'", v)))?;
                    q.limit = Some(i64::from(n));
                }
                SKIP_PARAM => {
                    let n: u32 = v
                        .parse()
                        .map_err(|_| AppError::BadRequest(format!("skip must be a non-negative integer, got '{}'", v)))?;
                    q.skip = Some(u64::from(n));
                }
                _ => {
                    if !is_top_level_field(&k) {
                        return Err(AppError::BadRequest(format!("invalid filter field: {}", k)));
                    }
                    q.filter.insert(k, query_value_to_bson(v));
                }
            }
        }
        Ok(q)
    }

    /// `max` comes straight from the path and must be a non-negative integer.
    pub fn sorted(max: &str, field: &str, direction: &str) -> Result<Self, AppError> {
        let max: u32 = max
            .parse()
            .map_err(|_| AppError::BadRequest(format!("max must be a non-negative integer, got '{}'", max)))?;
        if !is_top_level_field(field) {
            return Err(AppError::BadRequest(format!("invalid sort field: {}", field)));
        }
        Ok(ListQuery {
            filter: Document::new(),
            sort: Some((field.to_string(), SortDirection::from_token(direction))),
            skip: None,
            limit: Some(i64::from(max)),
        })
    }

    pub fn sort_document(&self) -> Option<Document> {
        self.sort.as_ref().map(|(field, dir)| {
            let mut d = Document::new();
            d.insert(field.clone(), dir.as_i32());
            d
        })
    }
}

/// Field names used in filters, sorts and updates name a top-level field only: no operators
/// (`$set`) and no dotted paths (`a.b`), which the database would resolve into nested documents.
pub fn is_top_level_field(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('$') && !name.contains('.')
}

pub fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// New record from a request body. A client-supplied `_id` is dropped; the store assigns one.
pub fn insert_document(body: Value) -> Result<Document, AppError> {
    let mut obj = body_to_object(body)?;
    obj.remove("_id");
    json_object_to_document(&obj)
}

/// Merge-patch fields from a request body. `_id` is immutable and ignored.
pub fn patch_document(body: Value) -> Result<Document, AppError> {
    let mut obj = body_to_object(body)?;
    obj.remove("_id");
    if obj.is_empty() {
        return Err(AppError::BadRequest("update body must contain at least one field".into()));
    }
    if let Some(k) = obj.keys().find(|k| !is_top_level_field(k)) {
        return Err(AppError::BadRequest(format!("invalid field name: {}", k)));
    }
    json_object_to_document(&obj)
}

pub fn set_update(patch: Document) -> Document {
    doc! { "$set": patch }
}

fn body_to_object(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
