//! Command-line client for a running `jargon-server`.

pub mod http;
pub mod render;

pub use http::{BaseUrlError, HttpTermApi};
