//! Shared helpers: build the router over an in-memory store and drive it with `oneshot`.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use collection_service::{app_router, AppState, DocumentStore, MemoryStore};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

pub const COLLECTIONS: &[&str] = &["products", "courses", "lessons", "UserData"];

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn app() -> TestApp {
    app_with_static_dir(Path::new("does-not-exist"))
}

pub fn app_with_static_dir(dir: &Path) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone() as Arc<dyn DocumentStore>, COLLECTIONS.iter().copied());
    TestApp {
        router: app_router(state, dir, 1024 * 1024),
        store,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!("body is not JSON ({e}): {}", String::from_utf8_lossy(&self.body))
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestApp {
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&v).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec();
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request("DELETE", uri, None).await
    }

    /// Insert through the API and return the assigned identifier.
    pub async fn insert(&self, collection: &str, body: Value) -> String {
        let resp = self.post(&format!("/collections/{collection}"), body).await;
        assert_eq!(resp.status, StatusCode::OK, "{}", resp.text());
        resp.json()["insertedId"].as_str().unwrap().to_string()
    }
}
