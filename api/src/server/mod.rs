//! API Server Module
//!
//! This module contains the server setup functionality for the prediction API.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use feedrank_core::EngagementModel;

use crate::handlers::{health_check, model_info, predict, ApiState};
use crate::models::ApiConfig;

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server around an already-loaded model
    pub fn new(config: ApiConfig, model: Arc<EngagementModel>) -> Self {
        let state = Arc::new(ApiState { model });
        Self { config, state }
    }

    /// Build the application router with the shared state
    pub fn router(&self) -> Router {
        Router::new()
            .route("/predict", post(predict))
            .route("/model", get(model_info))
            .route("/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until the process exits
    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting Feedrank API server v{} on {}:{}",
            self.config.version, self.config.host, self.config.port
        );

        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        info!("Feedrank API server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        Ok(())
    }
}
