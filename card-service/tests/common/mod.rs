#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use card_service::config::{CardConfig, Environment, MongoConfig, StorageBackend};
use card_service::services::{
    ApplicationService, FixedScore, InMemoryApplicationStore, MongoApplicationStore,
};
use card_service::startup::Application;
use card_service::{build_router, AppState};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

pub fn test_config(storage: StorageBackend) -> CardConfig {
    CardConfig {
        common: CoreConfig {
            port: 0,
            ..CoreConfig::default()
        },
        environment: Environment::Dev,
        service_name: "card-service".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        storage,
        mongodb: MongoConfig {
            uri: Secret::new(
                std::env::var("TEST_MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            database: format!("card_test_{}", Uuid::new_v4().simple()),
            collection: "credit_card_requests".to_string(),
        },
    }
}

/// State backed by the in-memory store with every new application scored `score`.
pub fn memory_state(score: u16) -> AppState {
    AppState {
        config: test_config(StorageBackend::Memory),
        applications: ApplicationService::new(
            Arc::new(InMemoryApplicationStore::new()),
            Arc::new(FixedScore(score)),
        ),
    }
}

pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let router: Router = build_router(state.clone());
    let response = router.oneshot(request).await.expect("router failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn create_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/applications")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn list_request() -> Request<Body> {
    Request::builder()
        .uri("/applications")
        .body(Body::empty())
        .unwrap()
}

pub fn delete_request(name: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/applications/{}", name))
        .body(Body::empty())
        .unwrap()
}

/// Full server on a random port backed by a throwaway MongoDB database.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoApplicationStore,
}

impl TestApp {
    pub async fn spawn(score: u16) -> Self {
        let config = test_config(StorageBackend::Mongodb);

        let app = Application::build_with_scores(config, Arc::new(FixedScore(score)))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app
            .mongo()
            .cloned()
            .expect("mongodb backend should expose its store");
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port, db }
    }

    /// Drops the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.database().drop(None).await;
    }
}
