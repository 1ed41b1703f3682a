//! Collection CRUD handlers: list, sorted list, read, create, update, delete.
//! Every handler returns a Result so each request gets exactly one response.

use crate::error::AppError;
use crate::extractors::CollectionName;
use crate::query::{parse_object_id, ListQuery};
use crate::response;
use crate::service::CollectionService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// GET /collections/:name: every record, optionally filtered and paged by query parameters.
pub async fn list(
    State(state): State<AppState>,
    collection: CollectionName,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let query = ListQuery::from_params(params)?;
    let rows = CollectionService::list(state.store.as_ref(), collection.as_str(), &query).await?;
    Ok(response::records(rows))
}

/// GET /collections/:name/:max/:sort_field/:direction
pub async fn list_sorted(
    State(state): State<AppState>,
    collection: CollectionName,
    Path((_, max, sort_field, direction)): Path<(String, String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let query = ListQuery::sorted(&max, &sort_field, &direction)?;
    let rows = CollectionService::list(state.store.as_ref(), collection.as_str(), &query).await?;
    Ok(response::records(rows))
}

pub async fn read(
    State(state): State<AppState>,
    collection: CollectionName,
    Path((_, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_object_id(&id_str)?;
    let row = CollectionService::read(state.store.as_ref(), collection.as_str(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".into()))?;
    Ok(response::record(row))
}

pub async fn create(
    State(state): State<AppState>,
    collection: CollectionName,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let outcome = CollectionService::create(state.store.as_ref(), collection.as_str(), body).await?;
    Ok(response::inserted(outcome))
}

pub async fn update(
    State(state): State<AppState>,
    collection: CollectionName,
    Path((_, id_str)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // The identifier is checked before the body so a bad id always reports as such.
    let id = parse_object_id(&id_str)?;
    let Json(body) = payload?;
    CollectionService::update(state.store.as_ref(), collection.as_str(), id, body).await?;
    Ok(response::success())
}

pub async fn delete(
    State(state): State<AppState>,
    collection: CollectionName,
    Path((_, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_object_id(&id_str)?;
    CollectionService::delete(state.store.as_ref(), collection.as_str(), id).await?;
    Ok(response::success())
}
