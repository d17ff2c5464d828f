//! Scoring Client
//!
//! Used by feed services to rank candidate items against a running
//! prediction server.

use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::{debug, warn};

use feedrank_core::FeatureRecord;

use crate::models::PredictResponse;

/// Score returned when the prediction server cannot be reached
pub const FALLBACK_SCORE: f64 = 0.0;

/// HTTP client for `POST /predict`
#[derive(Debug, Clone)]
pub struct ScoreClient {
    client: reqwest::Client,
    predict_url: String,
    timeout: Duration,
}

impl ScoreClient {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:9000`
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            predict_url: format!("{}/predict", base_url.as_ref().trim_end_matches('/')),
            timeout,
        }
    }

    /// Score a record, failing on transport errors and non-2xx responses
    pub async fn score(&self, record: &FeatureRecord) -> Result<f64> {
        let response = self
            .client
            .post(&self.predict_url)
            .json(record)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Prediction server returned {}: {}", status, body));
        }

        let body: PredictResponse = response.json().await?;
        debug!("Scored record: {}", body.score);
        Ok(body.score)
    }

    /// Score a record, falling back to [`FALLBACK_SCORE`] on any failure
    pub async fn score_or_default(&self, record: &FeatureRecord) -> f64 {
        match self.score(record).await {
            Ok(score) => score,
            Err(e) => {
                warn!("ML scoring failed, using fallback score: {}", e);
                FALLBACK_SCORE
            }
        }
    }
}
