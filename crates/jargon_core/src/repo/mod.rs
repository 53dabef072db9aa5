//! Repository layer over the `terms` table.
//!
//! # Responsibility
//! - Define the storage contract used by services.
//! - Isolate SQLite query details from request handling.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`) in
//!   addition to DB transport errors.

pub mod term_repo;
