//! Shared fixtures for API tests

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};

use feedrank_api::{ApiConfig, ApiServer};
use feedrank_core::{
    train, EngagementModel, FeatureRecord, ForestParams, TrainingSet, FEATURE_COUNT,
};

/// Small forest where the score grows with `likes`
pub fn trained_model() -> Arc<EngagementModel> {
    let rows: Vec<(FeatureRecord, f64)> = (0..60)
        .map(|i| {
            let mut values = [0.5; FEATURE_COUNT];
            values[1] = i as f64;
            (FeatureRecord::from_vector(&values).unwrap(), i as f64 / 10.0)
        })
        .collect();
    let set = TrainingSet::from_rows(&rows).expect("Failed to build training set");
    let params = ForestParams {
        n_trees: 20,
        ..ForestParams::default()
    };

    Arc::new(train(&set, &params).expect("Failed to train model"))
}

pub fn test_server() -> ApiServer {
    let config = ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        version: "test".to_string(),
    };
    ApiServer::new(config, trained_model())
}

pub fn payload(likes: f64) -> Value {
    json!({
        "views": 0.5,
        "likes": likes,
        "comments": 0.5,
        "shares": 0.5,
        "velocity": 0.5,
        "recencyMinutes": 0.5,
        "avgWatchCompletion": 0.5,
        "positiveReactionsRatio": 0.5,
        "userCategoryMatch": 0.5,
        "userAuthorAffinity": 0.5,
        "pastBehaviorScore": 0.5,
        "socialGraph": 0.5
    })
}
