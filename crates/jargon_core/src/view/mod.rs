//! Read-only projections of the cached term collection.
//!
//! # Responsibility
//! - Decide which terms are shown for a tab/status/search combination.
//! - Derive progress statistics and display strings.
//!
//! # Invariants
//! - Every function here is pure over its inputs; nothing mutates terms.

pub mod display;
pub mod filter;
pub mod stats;
