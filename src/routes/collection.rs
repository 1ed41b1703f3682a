//! Collection CRUD routes. The `:name` segment is resolved against the allow-list by the
//! CollectionName extractor in each handler.

use crate::handlers::collection::{create, delete as delete_handler, list, list_sorted, read, update};
use crate::routes::not_found;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn collection_routes(state: AppState) -> Router {
    Router::new()
        .route("/collections/:name", get(list).post(create).fallback(not_found))
        .route(
            "/collections/:name/:id",
            get(read).put(update).delete(delete_handler).fallback(not_found),
        )
        // The third segment shares the `:id` name with the route above; here it carries the max count.
        .route("/collections/:name/:id/:sort_field/:direction", get(list_sorted).fallback(not_found))
        .with_state(state)
}
