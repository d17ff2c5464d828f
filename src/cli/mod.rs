//! CLI module
//!
//! Provides:
//! - Argument parsing for the `train` and `serve` modes
//! - Merging of CLI overrides onto loaded configuration
//! - Mode dispatch

pub mod args;
pub mod dispatch;

// Re-exports
pub use args::{parse_args, Args, Mode, ServeArgs, TrainArgs};
pub use dispatch::{run, run_cli_mode, run_serve, run_train};

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(#[from] clap::Error),

    #[error(transparent)]
    Core(#[from] feedrank_core::Error),

    #[error("Server error: {0}")]
    Server(#[from] anyhow::Error),

    #[error("Training task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
