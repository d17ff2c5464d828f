//! Feedrank: engagement scoring for the content feed
//!
//! The `feedrank` binary has two modes. `train` fits the random-forest
//! engagement model from an exported CSV, and `serve` exposes it over HTTP.

pub mod cli;
pub mod logging;

pub use cli::{parse_args, run, Args, Mode};
pub use logging::{init_logging, LogOptions};
