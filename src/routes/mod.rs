//! Router assembly: route groups plus the middleware every request passes through.

pub mod collection;
pub mod common;
pub mod course;

pub use collection::collection_routes;
pub use common::{common_routes, WELCOME_TEXT};
pub use course::course_routes;

use crate::config::ServiceConfig;
use crate::state::AppState;
use axum::{
    extract::Request,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::path::Path;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir,
    trace::TraceLayer,
};

/// Body of every 404 for unmatched paths.
pub const NOT_FOUND_TEXT: &str = "Resource not found!";

/// Unmatched paths, and known paths requested with an unsupported method.
pub(crate) async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_TEXT)
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!(method = %req.method(), uri = %req.uri(), "incoming request");
    next.run(req).await
}

/// Full application: common, collection and course routes, `/images` static files, and a
/// plain-text 404 fallback. Panics in handlers become 500 responses.
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>, max_body_bytes: usize) -> Router {
    let images = ServeDir::new(static_dir.as_ref())
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(collection_routes(state.clone()))
        .merge(course_routes(state))
        .nest_service("/images", images)
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
}

/// [`app_router`] configured from a loaded [`ServiceConfig`].
pub fn build_router(state: AppState, config: &ServiceConfig) -> Router {
    app_router(state, &config.static_dir, config.max_body_bytes)
}
