//! Engagement Model Artifact
//!
//! A fitted random forest together with the schema it was trained against.
//! The artifact is written with bincode as two consecutive records: the
//! [`ModelSchema`] header, then the metadata and forest. Loading decodes the
//! header first and refuses artifacts whose feature order differs from this
//! build's [`FEATURE_NAMES`].

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use bincode::Options;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::features::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES, LABEL_COLUMN};
use crate::trainer::ForestParams;

/// Bumped whenever the on-disk layout changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

pub(crate) type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Input contract recorded in every artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub label: String,
}

impl ModelSchema {
    /// Schema produced by this build
    pub fn current() -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            label: LABEL_COLUMN.to_string(),
        }
    }

    /// Check that an artifact's schema can be served by this build
    pub fn ensure_compatible(&self) -> Result<()> {
        let current = Self::current();

        if self.format_version != current.format_version {
            return Err(Error::SchemaMismatch(format!(
                "artifact format version {} is not supported (expected {})",
                self.format_version, current.format_version
            )));
        }

        if self.feature_names != current.feature_names {
            return Err(Error::SchemaMismatch(format!(
                "artifact was trained on features {:?}, this build serves {:?}",
                self.feature_names, current.feature_names
            )));
        }

        Ok(())
    }
}

/// In-sample fit quality recorded at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub rmse: f64,
    pub mae: f64,
    pub training_time_ms: u64,
}

impl TrainingMetrics {
    pub fn from_predictions(labels: &[f64], predictions: &[f64], training_time_ms: u64) -> Self {
        let n = labels.len().max(1) as f64;
        let (squared, absolute) = labels
            .iter()
            .zip(predictions)
            .fold((0.0, 0.0), |(sq, abs), (y, p)| {
                let err = y - p;
                (sq + err * err, abs + err.abs())
            });

        Self {
            rmse: (squared / n).sqrt(),
            mae: absolute / n,
            training_time_ms,
        }
    }
}

/// Model metadata for tracking where an artifact came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub training_rows: usize,
    pub params: ForestParams,
    pub metrics: TrainingMetrics,
}

impl ModelMetadata {
    pub fn new(training_rows: usize, params: ForestParams, metrics: TrainingMetrics) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "RandomForestRegressor".to_string(),
            created_at: Utc::now(),
            training_rows,
            params,
            metrics,
        }
    }
}

/// A fitted engagement model, immutable once built
#[derive(Serialize, Deserialize)]
pub struct EngagementModel {
    schema: ModelSchema,
    metadata: ModelMetadata,
    forest: Forest,
}

impl fmt::Debug for EngagementModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngagementModel")
            .field("schema", &self.schema)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl EngagementModel {
    pub(crate) fn new(forest: Forest, metadata: ModelMetadata) -> Self {
        Self {
            schema: ModelSchema::current(),
            metadata,
            forest,
        }
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Score a single feature record
    pub fn predict(&self, record: &FeatureRecord) -> Result<f64> {
        self.predict_vector(&record.to_vector())
    }

    /// Score a single row given in [`FEATURE_NAMES`] order
    pub fn predict_vector(&self, values: &[f64]) -> Result<f64> {
        if values.len() != FEATURE_COUNT {
            return Err(Error::FeatureCount {
                expected: FEATURE_COUNT,
                actual: values.len(),
            });
        }

        let x = DenseMatrix::from_2d_vec(&vec![values.to_vec()])
            .map_err(|e| Error::Prediction(e.to_string()))?;
        let scores = self
            .forest
            .predict(&x)
            .map_err(|e| Error::Prediction(e.to_string()))?;

        scores
            .first()
            .copied()
            .ok_or_else(|| Error::Prediction("forest returned no score".to_string()))
    }

    /// Write the artifact, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, &self.schema)?;
        bincode::serialize_into(&mut writer, &(&self.metadata, &self.forest))?;
        writer.flush()?;

        info!("Model {} saved at: {}", self.metadata.id, path.display());
        Ok(())
    }

    /// Read an artifact written by [`EngagementModel::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading model from {}", path.display());

        let bytes = fs::read(path)?;
        // Length prefixes may not claim more than the file holds.
        let options = bincode::options()
            .with_fixint_encoding()
            .allow_trailing_bytes()
            .with_limit(bytes.len() as u64);
        let mut reader = bytes.as_slice();

        let schema: ModelSchema = options.deserialize_from(&mut reader)?;
        schema.ensure_compatible()?;

        let (metadata, forest): (ModelMetadata, Forest) = options.deserialize_from(&mut reader)?;

        info!(
            "Loaded model {} ({} trees, {} training rows)",
            metadata.id, metadata.params.n_trees, metadata.training_rows
        );
        Ok(Self {
            schema,
            metadata,
            forest,
        })
    }
}
