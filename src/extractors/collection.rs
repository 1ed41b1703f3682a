//! Resolve the `:name` path segment to an allowed collection before the handler runs.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;

/// Path parameter naming the collection.
pub const COLLECTION_PARAM: &str = "name";

/// A collection name taken from the path and checked against the configured allow-list.
/// Unknown names are rejected with 404 so arbitrary collections cannot be reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionName(pub String);

impl CollectionName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CollectionName {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let name = params
            .get(COLLECTION_PARAM)
            .ok_or_else(|| AppError::BadRequest("missing collection name".into()))?;
        if !state.is_known_collection(name) {
            tracing::warn!(collection = %name, "request for unknown collection");
            return Err(AppError::NotFound(format!("collection not found: {}", name)));
        }
        Ok(CollectionName(name.clone()))
    }
}
