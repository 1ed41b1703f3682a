//! Fixed-collection routes kept for existing clients.

use crate::handlers::course::{create_user_data, list_courses, update_inventory};
use crate::routes::not_found;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn course_routes(state: AppState) -> Router {
    Router::new()
        .route("/courses", get(list_courses).fallback(not_found))
        .route("/UserData", post(create_user_data).fallback(not_found))
        .route("/UpdatePrograms", put(update_inventory).fallback(not_found))
        .with_state(state)
}
