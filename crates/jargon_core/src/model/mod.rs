//! Domain model for tracked vocabulary terms.
//!
//! # Responsibility
//! - Define the canonical `Term` record and the payloads that mutate it.
//! - Declare the single column table shared by storage and the wire format.
//!
//! # Invariants
//! - Every term is identified by a stable, client-assigned `TermId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod envelope;
pub mod schema;
pub mod term;
