//! API Handlers Module
//!
//! This module contains the request handlers for the prediction server.

use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use feedrank_core::{EngagementModel, FeatureRecord};

use crate::error::ApiError;
use crate::models::{ModelInfoResponse, PredictResponse};

/// Represents the state of the API server
pub struct ApiState {
    /// Model loaded at startup, shared read-only by every request
    pub model: Arc<EngagementModel>,
}

/// Health check endpoint
#[debug_handler]
pub async fn health_check() -> Json<HashMap<String, String>> {
    let mut response = HashMap::new();
    response.insert("status".to_string(), "healthy".to_string());
    response.insert("service".to_string(), "feedrank-api".to_string());
    Json(response)
}

/// Score one feature record
#[debug_handler]
pub async fn predict(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<FeatureRecord>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(record) = payload?;
    tracing::debug!("Scoring record: {:?}", record);

    let score = state.model.predict(&record)?;
    Ok(Json(PredictResponse { score }))
}

/// Describe the loaded model
#[debug_handler]
pub async fn model_info(State(state): State<Arc<ApiState>>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        schema: state.model.schema().clone(),
        metadata: state.model.metadata().clone(),
    })
}
