//! Collection service: CRUD over MongoDB collections behind an axum router.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{load_from_env, resolve, ServiceConfig, StoreConfig};
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{app_router, build_router};
pub use service::CollectionService;
pub use state::AppState;
pub use store::{DocumentStore, MemoryStore, MongoStore};
