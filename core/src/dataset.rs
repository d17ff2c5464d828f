//! Training Data
//!
//! Loads the engagement CSV into a dense feature matrix. Columns are looked
//! up by name, so the file's column order is irrelevant; the matrix is
//! always laid out in [`FEATURE_NAMES`] order.

use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::features::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES, LABEL_COLUMN};

/// Feature matrix plus label vector
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    features: Array2<f64>,
    labels: Array1<f64>,
}

impl TrainingSet {
    /// Create a training set, validating its shape
    pub fn new(features: Array2<f64>, labels: Array1<f64>) -> Result<Self> {
        if features.ncols() != FEATURE_COUNT {
            return Err(Error::FeatureCount {
                expected: FEATURE_COUNT,
                actual: features.ncols(),
            });
        }

        if features.nrows() != labels.len() {
            return Err(Error::ShapeMismatch(format!(
                "features and labels must have same number of samples: {} vs {}",
                features.nrows(),
                labels.len()
            )));
        }

        if labels.is_empty() {
            return Err(Error::EmptyDataset);
        }

        Ok(Self { features, labels })
    }

    /// Build a training set from in-memory records
    pub fn from_rows(rows: &[(FeatureRecord, f64)]) -> Result<Self> {
        let mut features = Array2::zeros((rows.len(), FEATURE_COUNT));
        for (mut row, (record, _)) in features.rows_mut().into_iter().zip(rows) {
            row.assign(&ArrayView1::from(&record.to_vector()));
        }

        let labels: Array1<f64> = rows.iter().map(|(_, label)| *label).collect();
        Self::new(features, labels)
    }

    /// Load a training set from a CSV file with a header row
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading training data from {}", path.display());

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        Self::from_dataframe(&df)
    }

    /// Extract the feature and label columns from a data frame
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let ignored: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .filter(|name| name != LABEL_COLUMN && !FEATURE_NAMES.contains(&name.as_str()))
            .collect();
        if !ignored.is_empty() {
            warn!("Ignoring columns not in the feature schema: {:?}", ignored);
        }

        let rows = df.height();
        if rows == 0 {
            return Err(Error::EmptyDataset);
        }

        let mut features = Array2::zeros((rows, FEATURE_COUNT));
        for (j, name) in FEATURE_NAMES.iter().enumerate() {
            let values = numeric_column(df, name)?;
            features.column_mut(j).assign(&Array1::from(values));
        }
        let labels = Array1::from(numeric_column(df, LABEL_COLUMN)?);

        debug!("Loaded {} rows x {} features", rows, FEATURE_COUNT);
        Self::new(features, labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.labels.view()
    }

    /// Feature rows as owned vectors, the layout the forest is fitted on
    pub fn feature_rows(&self) -> Vec<Vec<f64>> {
        self.features.outer_iter().map(|row| row.to_vec()).collect()
    }
}

/// Read a column as `f64`, rejecting nulls and values that fail to cast
fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .map_err(|_| Error::MissingColumn(name.to_string()))?;

    let cast = series
        .cast(&DataType::Float64)
        .map_err(|e| Error::InvalidColumn {
            column: name.to_string(),
            reason: e.to_string(),
        })?;
    let values = cast.f64()?;

    // Non-strict casts turn unparsable strings into nulls.
    if values.null_count() > 0 {
        return Err(Error::InvalidColumn {
            column: name.to_string(),
            reason: format!("{} empty or non-numeric values", values.null_count()),
        });
    }

    Ok(values.into_no_null_iter().collect())
}
