//! Feedrank CLI
//!
//! - `feedrank train`: fit the engagement model from the CSV export
//! - `feedrank serve`: serve `POST /predict` from the saved model

use feedrank::cli::{parse_args, run_cli_mode, Error, EXIT_FAILURE};
use feedrank::logging::{init_logging, LogOptions};

#[tokio::main]
async fn main() {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        // Help and version requests also arrive here; clap picks the exit code.
        Err(Error::InvalidArgs(e)) => e.exit(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let guard = match init_logging(LogOptions {
        verbose: args.verbose,
        json: args.json_logs,
    }) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let code = run_cli_mode(args).await;
    // Flush buffered log lines before exiting.
    drop(guard);
    std::process::exit(code);
}
