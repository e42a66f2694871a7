//! Shared harness for HTTP integration tests.
//!
//! Builds the full application router over the in-memory adapters and the
//! mock token verifier, then drives it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use trainings_service::adapters::auth::MockTokenVerifier;
use trainings_service::adapters::events::InMemoryEventPublisher;
use trainings_service::adapters::http::{app_router, FavoritesState, TrainingsState};
use trainings_service::adapters::memory::{
    InMemoryFavoritesRepository, InMemoryStore, InMemoryTrainingRepository,
};

/// Fixed tokens registered on every test app.
pub const ALICE: &str = "alice-token"; // user 1
pub const BOB: &str = "bob-token"; // user 2
pub const ADMIN: &str = "admin-token"; // user 99, admin

pub struct TestApp {
    pub router: axum::Router,
    pub events: Arc<InMemoryEventPublisher>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let events = Arc::new(InMemoryEventPublisher::new());
        let verifier = Arc::new(
            MockTokenVerifier::new()
                .with_user(ALICE, 1)
                .with_user(BOB, 2)
                .with_admin(ADMIN, 99),
        );

        let router = app_router(
            TrainingsState {
                repository: Arc::new(InMemoryTrainingRepository::new(store.clone())),
                events: events.clone(),
            },
            FavoritesState {
                repository: Arc::new(InMemoryFavoritesRepository::new(store)),
                events: events.clone(),
            },
            verifier,
        );

        Self { router, events }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response<Body> {
        self.request("GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Response<Body> {
        self.request("POST", uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> Response<Body> {
        self.request("PATCH", uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response<Body> {
        self.request("DELETE", uri, Some(token), None).await
    }

    /// Creates a training as `token` and returns its id.
    pub async fn create_training(&self, token: &str, title: &str) -> i64 {
        let response = self
            .post(
                "/trainings",
                token,
                serde_json::json!({
                    "title": title,
                    "description": "test plan",
                    "type": "RUNNING",
                    "difficulty": 3
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["id"].as_i64().unwrap()
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
