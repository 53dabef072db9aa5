//! HTTP service for the Jargon Buster term store.
//!
//! Exposes one resource collection, `/terms`, over a single SQLite
//! connection opened at startup.

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiFailure;
pub use routes::{app, term_routes, AppState};
