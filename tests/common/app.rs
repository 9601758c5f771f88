//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use colorgorical::models::AppConfig;
use colorgorical::server::{build_router, AppState};
use colorgorical::services::ScoringService;

use super::fixtures;

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub scoring: Arc<ScoringService>,
}

impl TestApp {
    /// Create a new test application over the synthetic tables
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom config
    ///
    /// Tables are built in memory; `config.data_dir` is not read.
    pub fn with_config(config: AppConfig) -> Self {
        let scoring = Arc::new(ScoringService::new(
            fixtures::synthetic_tables(),
            config.parallel_threshold,
        ));
        let state = AppState {
            config: Arc::new(config),
            scoring: scoring.clone(),
        };

        // Build router using shared server module (same as production)
        Self::from_state(state)
    }

    /// Wrap an existing state
    pub fn from_state(state: AppState) -> Self {
        let scoring = state.scoring.clone();
        Self {
            router: build_router(state),
            scoring,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
