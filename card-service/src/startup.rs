//! Application wiring and server lifecycle.

use crate::config::{CardConfig, StorageBackend};
use crate::handlers;
use crate::services::{
    ApplicationService, ApplicationStore, InMemoryApplicationStore, MongoApplicationStore,
    RandomScore, ScoreSource,
};
use axum::{
    middleware::from_fn,
    routing::{delete, get},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: CardConfig,
    pub applications: ApplicationService,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/applications",
            get(handlers::list_applications).post(handlers::create_application),
        )
        .route("/applications/:name", delete(handlers::delete_application))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    mongo: Option<MongoApplicationStore>,
}

impl Application {
    /// Build the application with random score generation.
    pub async fn build(config: CardConfig) -> Result<Self, AppError> {
        Self::build_with_scores(config, Arc::new(RandomScore)).await
    }

    /// Build the application with an explicit score source.
    pub async fn build_with_scores(
        config: CardConfig,
        scores: Arc<dyn ScoreSource>,
    ) -> Result<Self, AppError> {
        let (store, mongo): (Arc<dyn ApplicationStore>, Option<MongoApplicationStore>) =
            match config.storage {
                StorageBackend::Mongodb => {
                    let db = MongoApplicationStore::connect(
                        config.mongodb_uri(),
                        &config.mongodb.database,
                        &config.mongodb.collection,
                    )
                    .await?;
                    db.initialize_indexes().await.map_err(|e| {
                        tracing::error!("Failed to initialize database indexes: {}", e);
                        e
                    })?;
                    (Arc::new(db.clone()), Some(db))
                }
                StorageBackend::Memory => {
                    tracing::warn!("Using in-memory application store; data is not persisted");
                    (Arc::new(InMemoryApplicationStore::new()), None)
                }
            };

        let state = AppState {
            config: config.clone(),
            applications: ApplicationService::new(store, scores),
        };

        let router = build_router(state);

        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(service = %config.service_name, "Listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
            mongo,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn mongo(&self) -> Option<&MongoApplicationStore> {
        self.mongo.as_ref()
    }

    /// Serves until Ctrl+C or SIGTERM, then releases the MongoDB client.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        if let Some(mongo) = self.mongo {
            mongo.shutdown().await;
        }

        tracing::info!("Service shutdown complete");
        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
