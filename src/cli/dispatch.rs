//! CLI mode dispatch

use std::sync::Arc;

use tracing::{error, info};

use feedrank_api::{ApiConfig, ApiServer};
use feedrank_core::{
    train_to_file, EngagementModel, RankerConfig, ServerSettings, TrainingReport,
    TrainingSettings,
};

use crate::cli::{Args, Mode, Result, EXIT_FAILURE, EXIT_SUCCESS};

/// Run the selected mode and map the outcome to a process exit code
pub async fn run_cli_mode(args: Args) -> i32 {
    match run(args).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Load configuration, apply CLI overrides and run the selected mode
pub async fn run(args: Args) -> Result<()> {
    let config = RankerConfig::load(args.config.as_deref())?;

    match args.mode {
        Mode::Train(train_args) => {
            let mut settings = config.training;
            train_args.apply(&mut settings);
            let report = run_train(settings).await?;
            println!("Model saved at: {}", report.model_path.display());
            Ok(())
        }
        Mode::Serve(serve_args) => {
            let mut settings = config.server;
            serve_args.apply(&mut settings);
            run_serve(settings).await
        }
    }
}

/// Train on the configured CSV and write the artifact
///
/// Fitting is CPU-bound, so it runs on the blocking pool.
pub async fn run_train(settings: TrainingSettings) -> Result<TrainingReport> {
    info!("Training model from {}", settings.data_path.display());

    let report = tokio::task::spawn_blocking(move || {
        train_to_file(&settings.data_path, &settings.model_path, &settings.forest)
    })
    .await??;

    info!(
        "Trained on {} rows (rmse {:.4}, mae {:.4})",
        report.rows, report.metrics.rmse, report.metrics.mae
    );
    Ok(report)
}

/// Load the artifact once and serve until the process is stopped
pub async fn run_serve(settings: ServerSettings) -> Result<()> {
    let model = EngagementModel::load(&settings.model_path)?;
    let server = ApiServer::new(ApiConfig::from(&settings), Arc::new(model));
    server.start().await?;
    Ok(())
}
