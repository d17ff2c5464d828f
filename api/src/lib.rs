//! Feedrank API Module
//!
//! The API module serves the engagement model over HTTP. It also provides
//! a small client used by feed services to score candidate items.

pub mod client;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;

pub use client::ScoreClient;
pub use error::ApiError;
pub use handlers::*;
pub use models::*;
pub use server::*;
