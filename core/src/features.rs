//! Feature Schema
//!
//! The engagement model consumes a fixed-order vector of twelve numeric
//! features. [`FEATURE_NAMES`] defines that order for the CSV loader, the
//! HTTP payload, and the schema stored inside every model artifact.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of features in a [`FeatureRecord`]
pub const FEATURE_COUNT: usize = 12;

/// Name of the target column in training data
pub const LABEL_COLUMN: &str = "label";

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "views",
    "likes",
    "comments",
    "shares",
    "velocity",
    "recencyMinutes",
    "avgWatchCompletion",
    "positiveReactionsRatio",
    "userCategoryMatch",
    "userAuthorAffinity",
    "pastBehaviorScore",
    "socialGraph",
];

/// Engagement features for one content item / user pairing
///
/// Every field is required. Deserialization fails on a missing or
/// non-numeric field rather than falling back to a default; unknown fields
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub views: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
    /// First-hour views relative to the hourly average over 24h
    pub velocity: f64,
    pub recency_minutes: f64,
    pub avg_watch_completion: f64,
    pub positive_reactions_ratio: f64,
    pub user_category_match: f64,
    pub user_author_affinity: f64,
    pub past_behavior_score: f64,
    pub social_graph: f64,
}

impl FeatureRecord {
    /// Build the model input vector in [`FEATURE_NAMES`] order
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.views,
            self.likes,
            self.comments,
            self.shares,
            self.velocity,
            self.recency_minutes,
            self.avg_watch_completion,
            self.positive_reactions_ratio,
            self.user_category_match,
            self.user_author_affinity,
            self.past_behavior_score,
            self.social_graph,
        ]
    }

    /// Rebuild a record from a vector in [`FEATURE_NAMES`] order
    pub fn from_vector(values: &[f64]) -> Result<Self> {
        let v: &[f64; FEATURE_COUNT] = values.try_into().map_err(|_| Error::FeatureCount {
            expected: FEATURE_COUNT,
            actual: values.len(),
        })?;

        Ok(Self {
            views: v[0],
            likes: v[1],
            comments: v[2],
            shares: v[3],
            velocity: v[4],
            recency_minutes: v[5],
            avg_watch_completion: v[6],
            positive_reactions_ratio: v[7],
            user_category_match: v[8],
            user_author_affinity: v[9],
            past_behavior_score: v[10],
            social_graph: v[11],
        })
    }
}
