//! CLI argument parsing
//!
//! ```text
//! feedrank [--config <file>] [--verbose] [--json-logs] <mode>
//!
//! MODES:
//!   train   Fit the engagement model from a CSV export
//!   serve   Serve POST /predict from a saved model
//! ```
//!
//! Flags left unset fall back to the loaded configuration.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use feedrank_core::{ServerSettings, TrainingSettings};

use crate::cli::Result;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "feedrank", version, about = "Train and serve the feed engagement model")]
pub struct Args {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub mode: Mode,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Mode {
    /// Fit the model and write the artifact
    Train(TrainArgs),

    /// Load the artifact and serve predictions
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Default, PartialEq, clap::Args)]
pub struct TrainArgs {
    /// Training CSV
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Where to write the model artifact
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Number of trees in the forest
    #[arg(long)]
    pub trees: Option<usize>,

    #[arg(long)]
    pub max_depth: Option<u16>,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl TrainArgs {
    /// Overlay the flags that were given onto `settings`
    pub fn apply(&self, settings: &mut TrainingSettings) {
        if let Some(ref data) = self.data {
            settings.data_path = data.clone();
        }
        if let Some(ref model) = self.model {
            settings.model_path = model.clone();
        }
        if let Some(trees) = self.trees {
            settings.forest.n_trees = trees;
        }
        if let Some(depth) = self.max_depth {
            settings.forest.max_depth = Some(depth);
        }
        if let Some(seed) = self.seed {
            settings.forest.seed = seed;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, clap::Args)]
pub struct ServeArgs {
    /// Model artifact to load at startup
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Overlay the flags that were given onto `settings`
    pub fn apply(&self, settings: &mut ServerSettings) {
        if let Some(ref model) = self.model {
            settings.model_path = model.clone();
        }
        if let Some(ref host) = self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
    }
}

/// Parse CLI arguments, returning clap's error instead of exiting
pub fn parse_args<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(Args::try_parse_from(args)?)
}
