//! Random Forest Training

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

use crate::dataset::TrainingSet;
use crate::error::{Error, Result};
use crate::features::FEATURE_COUNT;
use crate::model::{EngagementModel, ModelMetadata, TrainingMetrics};

/// Forest hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_trees: usize,
    /// `None` grows trees until leaves are pure or too small to split
    pub max_depth: Option<u16>,
    pub min_samples_leaf: usize,
    pub min_samples_split: usize,
    /// Features tried per split; `None` means all of them
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 300,
            max_depth: Some(15),
            min_samples_leaf: 1,
            min_samples_split: 2,
            max_features: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(Error::InvalidParams(
                "n_trees must be greater than 0".to_string(),
            ));
        }

        if self.max_depth == Some(0) {
            return Err(Error::InvalidParams(
                "max_depth must be greater than 0".to_string(),
            ));
        }

        if self.min_samples_leaf == 0 || self.min_samples_split < 2 {
            return Err(Error::InvalidParams(format!(
                "min_samples_leaf must be >= 1 and min_samples_split >= 2, got {} and {}",
                self.min_samples_leaf, self.min_samples_split
            )));
        }

        if let Some(m) = self.max_features {
            if m == 0 || m > FEATURE_COUNT {
                return Err(Error::InvalidParams(format!(
                    "max_features must be between 1 and {}, got {}",
                    FEATURE_COUNT, m
                )));
            }
        }

        Ok(())
    }

    fn to_smartcore(&self) -> RandomForestRegressorParameters {
        let mut params = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_trees)
            .with_min_samples_leaf(self.min_samples_leaf)
            .with_min_samples_split(self.min_samples_split)
            .with_m(self.max_features.unwrap_or(FEATURE_COUNT))
            .with_seed(self.seed);

        if let Some(depth) = self.max_depth {
            params = params.with_max_depth(depth);
        }

        params
    }
}

/// Summary of a completed training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub params: ForestParams,
    pub metrics: TrainingMetrics,
    pub model_path: PathBuf,
}

/// Fit a random forest regressor on the whole training set
pub fn train(set: &TrainingSet, params: &ForestParams) -> Result<EngagementModel> {
    params.validate()?;

    info!(
        "Starting Random Forest training with {} samples, {} trees, max depth {:?}",
        set.len(),
        params.n_trees,
        params.max_depth
    );
    let started = Instant::now();

    let x = DenseMatrix::from_2d_vec(&set.feature_rows())
        .map_err(|e| Error::Training(e.to_string()))?;
    let y = set.labels().to_vec();

    let forest = RandomForestRegressor::fit(&x, &y, params.to_smartcore())
        .map_err(|e| Error::Training(e.to_string()))?;
    let training_time_ms = started.elapsed().as_millis() as u64;

    let fitted = forest
        .predict(&x)
        .map_err(|e| Error::Prediction(e.to_string()))?;
    let metrics = TrainingMetrics::from_predictions(&y, &fitted, training_time_ms);

    info!(
        "Random Forest training completed in {}ms (rmse {:.4}, mae {:.4})",
        metrics.training_time_ms, metrics.rmse, metrics.mae
    );

    let metadata = ModelMetadata::new(set.len(), params.clone(), metrics);
    Ok(EngagementModel::new(forest, metadata))
}

/// Load a CSV, fit the forest and write the artifact
pub fn train_to_file(
    data_path: impl AsRef<Path>,
    model_path: impl AsRef<Path>,
    params: &ForestParams,
) -> Result<TrainingReport> {
    let set = TrainingSet::from_csv(data_path)?;
    let model = train(&set, params)?;
    model.save(model_path.as_ref())?;

    Ok(TrainingReport {
        rows: set.len(),
        params: params.clone(),
        metrics: model.metadata().metrics.clone(),
        model_path: model_path.as_ref().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureRecord, FEATURE_NAMES, LABEL_COLUMN};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tempfile::TempDir;

    /// `label = 0.01 * views + 5 * avgWatchCompletion` with noisy distractors
    fn engagement_rows(n: usize, seed: u64) -> Vec<(FeatureRecord, f64)> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let mut values = [0.0; FEATURE_COUNT];
                for v in values.iter_mut() {
                    *v = rng.gen_range(0.0..1.0);
                }
                values[0] = rng.gen_range(10.0..5000.0);
                let label = 0.01 * values[0] + 5.0 * values[6];
                (FeatureRecord::from_vector(&values).unwrap(), label)
            })
            .collect()
    }

    fn quick_params() -> ForestParams {
        ForestParams {
            n_trees: 25,
            ..ForestParams::default()
        }
    }

    #[test]
    fn test_default_params_match_production_settings() {
        let params = ForestParams::default();
        assert_eq!(params.n_trees, 300);
        assert_eq!(params.max_depth, Some(15));
        assert_eq!(params.seed, 42);
        assert_eq!(params.max_features, None);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let cases = [
            ForestParams { n_trees: 0, ..ForestParams::default() },
            ForestParams { max_depth: Some(0), ..ForestParams::default() },
            ForestParams { min_samples_split: 1, ..ForestParams::default() },
            ForestParams { min_samples_leaf: 0, ..ForestParams::default() },
            ForestParams { max_features: Some(0), ..ForestParams::default() },
            ForestParams { max_features: Some(FEATURE_COUNT + 1), ..ForestParams::default() },
        ];

        for params in cases {
            assert!(
                matches!(params.validate(), Err(Error::InvalidParams(_))),
                "{:?} should be rejected",
                params
            );
        }
    }

    #[test]
    fn test_single_row_trains_to_constant_model() {
        let rows = engagement_rows(1, 1);
        let label = rows[0].1;
        let set = TrainingSet::from_rows(&rows).unwrap();
        let model = train(&set, &quick_params()).unwrap();

        assert_eq!(model.metadata().training_rows, 1);
        let score = model.predict(&rows[0].0).unwrap();
        assert!((score - label).abs() < 1e-9, "score {} vs label {}", score, label);
    }

    #[test]
    fn test_fewer_rows_than_min_samples_split_still_trains() {
        let set = TrainingSet::from_rows(&engagement_rows(3, 2)).unwrap();
        let params = ForestParams {
            min_samples_split: 10,
            ..quick_params()
        };
        let model = train(&set, &params).unwrap();
        assert_eq!(model.metadata().training_rows, 3);
    }

    #[test]
    fn test_training_fits_signal() {
        let set = TrainingSet::from_rows(&engagement_rows(200, 7)).unwrap();
        let model = train(&set, &quick_params()).unwrap();

        let metadata = model.metadata();
        assert_eq!(metadata.training_rows, 200);
        assert_eq!(metadata.params.n_trees, 25);
        // Labels span roughly 0..55; an in-sample fit should be far tighter.
        assert!(metadata.metrics.rmse < 5.0, "rmse {}", metadata.metrics.rmse);

        let (probe, label) = engagement_rows(1, 99)[0];
        let score = model.predict(&probe).unwrap();
        assert!((score - label).abs() < 8.0, "score {} label {}", score, label);
    }

    #[test]
    fn test_same_seed_gives_same_model() {
        let set = TrainingSet::from_rows(&engagement_rows(60, 3)).unwrap();
        let a = train(&set, &quick_params()).unwrap();
        let b = train(&set, &quick_params()).unwrap();

        for (probe, _) in engagement_rows(5, 11) {
            assert_eq!(a.predict(&probe).unwrap(), b.predict(&probe).unwrap());
        }
    }

    #[test]
    fn test_inference_is_deterministic() {
        let set = TrainingSet::from_rows(&engagement_rows(60, 5)).unwrap();
        let model = train(&set, &quick_params()).unwrap();
        let (probe, _) = engagement_rows(1, 17)[0];

        let first = model.predict(&probe).unwrap();
        for _ in 0..20 {
            assert_eq!(model.predict(&probe).unwrap(), first);
        }
    }

    #[test]
    fn test_train_to_file_writes_loadable_artifact() {
        let temp = TempDir::new().unwrap();
        let data_path = temp.path().join("training_data.csv");
        let model_path = temp.path().join("model").join("model.bin");

        let mut csv = format!("{},{}\n", LABEL_COLUMN, FEATURE_NAMES.join(","));
        for (record, label) in engagement_rows(50, 21) {
            let values: Vec<String> = record.to_vector().iter().map(|v| v.to_string()).collect();
            csv.push_str(&format!("{},{}\n", label, values.join(",")));
        }
        std::fs::write(&data_path, csv).unwrap();

        let report = train_to_file(&data_path, &model_path, &quick_params()).unwrap();
        assert_eq!(report.rows, 50);
        assert_eq!(report.model_path, model_path);

        let model = EngagementModel::load(&model_path).unwrap();
        assert_eq!(model.metadata().training_rows, 50);
        assert!(model.predict_vector(&[1.0; FEATURE_COUNT]).is_ok());
    }
}
