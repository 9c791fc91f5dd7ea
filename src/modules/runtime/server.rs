//! HTTP server for the climate API

use axum::{routing::get, Router};
use climate_api_core::{ClimateError, DatabaseConfig, Model, Route, Schema};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::handlers::ClimateHandler;
use crate::state::AppState;
use crate::store::{self, Store};

/// Build the Axum router over an already opened store
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(Route::Home.pattern(), get(ClimateHandler::home))
        .route(
            Route::Precipitation.pattern(),
            get(ClimateHandler::precipitation),
        )
        .route(Route::Stations.pattern(), get(ClimateHandler::stations))
        .route(Route::Tobs.pattern(), get(ClimateHandler::tobs))
        .route(Route::Start.pattern(), get(ClimateHandler::temperature_from))
        .route(
            Route::StartEnd.pattern(),
            get(ClimateHandler::temperature_between),
        )
        // Liveness only, never touches the store
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}

/// Runtime server for the climate API
pub struct Runtime {
    model: Arc<Model>,
    store: Arc<dyn Store>,
}

/// Apply CLI overrides to a model configuration
pub fn apply_overrides(
    mut model: Model,
    port_override: Option<u16>,
    database_url_override: Option<String>,
) -> Model {
    if let Some(port) = port_override {
        let server = model.server.get_or_insert_with(Default::default);
        server.port = Some(port.to_string());
    }
    if let Some(url) = database_url_override {
        model.database = DatabaseConfig::from_url(url);
    }
    model
}

impl Runtime {
    /// Open the store and check it against the declared schema.
    ///
    /// Startup fails if the store is unreachable or does not match.
    pub async fn new(model: Model) -> Result<Self, ClimateError> {
        let store = store::connect(&model.database, &model.pool()).await?;
        Self::with_store(model, store).await
    }

    /// Build a runtime over an existing store, verifying its schema
    pub async fn with_store(model: Model, store: Arc<dyn Store>) -> Result<Self, ClimateError> {
        let schema = Schema::current();
        if let Err(e) = store.verify_schema(&schema).await {
            store.close().await;
            return Err(e);
        }
        info!(
            "Store matches schema v{} ({} tables)",
            schema.version,
            schema.tables.len()
        );

        Ok(Self {
            model: Arc::new(model),
            store,
        })
    }

    /// Build the Axum router for this runtime
    pub fn router(&self) -> Router {
        build_router(AppState::new(self.store.clone()))
    }

    /// Start the server
    pub async fn run(&self) -> Result<(), ClimateError> {
        let addr: SocketAddr = format!("0.0.0.0:{}", self.model.port())
            .parse()
            .map_err(|e| ClimateError::Server(format!("Invalid address: {}", e)))?;

        let app = self.router();

        info!("Starting climate API on http://{}", addr);
        info!("Model: {}", self.model.name);
        info!("Store: {}", self.store.connector_type());
        for route in Route::all() {
            debug!("  {} - {}", route, route.description());
        }

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ClimateError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .map_err(|e| ClimateError::Server(format!("Server error: {}", e)))?;

        info!("Server stopped");
        self.shutdown().await;

        Ok(())
    }

    /// Wait for shutdown signal
    async fn shutdown_signal() {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                debug!("Received CTRL+C, shutting down...");
            }
            _ = terminate => {
                debug!("Received SIGTERM, shutting down...");
            }
        }
    }

    /// Close the store's connections
    pub async fn shutdown(&self) {
        info!("Closing database connections...");
        self.store.close().await;
        info!("Shutdown complete");
    }

    /// Get the model
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Get the store
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_api_core::ServerConfig;
    use climate_api_types::Connector;

    #[test]
    fn test_apply_port_override_with_existing_server() {
        let mut model = Model::default();
        model.server = Some(ServerConfig {
            port: Some("8080".to_string()),
            log_level: Some(2),
            pool: None,
        });
        let result = apply_overrides(model, Some(3000), None);
        let server = result.server.unwrap();
        assert_eq!(server.port, Some("3000".to_string()));
        assert_eq!(server.log_level, Some(2));
    }

    #[test]
    fn test_apply_port_override_without_server() {
        let result = apply_overrides(Model::default(), Some(3000), None);
        assert_eq!(result.port(), 3000);
    }

    #[test]
    fn test_apply_database_override() {
        let result = apply_overrides(
            Model::default(),
            None,
            Some("postgres://localhost/hawaii".to_string()),
        );
        assert_eq!(result.database.connector, Connector::Postgres);
    }

    #[test]
    fn test_apply_no_overrides() {
        let result = apply_overrides(Model::default(), None, None);
        assert!(result.server.is_none());
        assert_eq!(result.database, DatabaseConfig::default());
    }
}
