//! Shared application state for all routes. Built once at startup and cloned into every request.

use crate::store::DocumentStore;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Collections reachable through `/collections/:name`.
    pub collections: Arc<HashSet<String>>,
}

impl AppState {
    pub fn new<I, S>(store: Arc<dyn DocumentStore>, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AppState {
            store,
            collections: Arc::new(collections.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_known_collection(&self, name: &str) -> bool {
        self.collections.contains(name)
    }
}
