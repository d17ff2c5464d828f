//! Feedrank Core Module
//!
//! The core module provides the engagement-scoring model used by the feed
//! ranker: the fixed feature schema, CSV dataset loading, random-forest
//! training, and the serialized model artifact consumed by the API server.

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod model;
pub mod trainer;

pub use config::{RankerConfig, ServerSettings, TrainingSettings};
pub use dataset::TrainingSet;
pub use error::{Error, Result};
pub use features::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES, LABEL_COLUMN};
pub use model::{EngagementModel, ModelMetadata, ModelSchema, TrainingMetrics};
pub use trainer::{train, train_to_file, ForestParams, TrainingReport};
