//! Fixed-collection endpoints: course listing, inventory update, user data insert.

use crate::config::{COURSES_COLLECTION, USER_DATA_COLLECTION};
use crate::error::AppError;
use crate::query::ListQuery;
use crate::response;
use crate::service::CollectionService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

/// Body of `PUT /UpdatePrograms`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    pub course_id: String,
    pub available_inventory: Value,
}

/// GET /courses
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CollectionService::list(state.store.as_ref(), COURSES_COLLECTION, &ListQuery::all()).await?;
    Ok(response::records(rows))
}

/// PUT /UpdatePrograms. Negative or non-numeric inventory is rejected before the store is touched.
pub async fn update_inventory(
    State(state): State<AppState>,
    payload: Result<Json<InventoryUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    CollectionService::update_inventory(state.store.as_ref(), &body.course_id, &body.available_inventory).await?;
    Ok(response::success())
}

/// POST /UserData
pub async fn create_user_data(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let outcome = CollectionService::create(state.store.as_ref(), USER_DATA_COLLECTION, body).await?;
    Ok(response::inserted(outcome))
}
