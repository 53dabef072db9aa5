//! Client state management for term collections.
//!
//! # Responsibility
//! - Keep one owned, in-memory copy of the term collection per cache.
//! - Synchronize it with a service through the `TermApi` transport seam.
//!
//! # See also
//! - `jargon_cli` for the HTTP transport.

pub mod api;
pub mod cache;
