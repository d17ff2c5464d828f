//! Core errors

use std::io;

/// Errors raised while loading data, training, or (de)serializing a model
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Data error: {0}")]
    Data(#[from] polars::prelude::PolarsError),

    #[error("Missing column '{0}' in training data")]
    MissingColumn(String),

    #[error("Column '{column}' is not numeric: {reason}")]
    InvalidColumn { column: String, reason: String },

    #[error("Training data is empty")]
    EmptyDataset,

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("Invalid forest parameters: {0}")]
    InvalidParams(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Model schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
