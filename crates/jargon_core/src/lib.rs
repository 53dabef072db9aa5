//! Core domain logic for Jargon Buster, a personal vocabulary tracker.
//! This crate is the single source of truth for term invariants.

pub mod client;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use client::api::{ApiError, ApiResult, TermApi};
pub use client::cache::{utc_now, ClientError, ClientResult, Clock, TermCache};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::envelope::{Ack, ErrorBody};
pub use model::term::{ContentEdit, NewTerm, StatusChange, Term, TermId, TermValidationError};
pub use repo::term_repo::{RepoError, RepoResult, SqliteTermRepository, TermRepository};
pub use service::term_service::TermService;
pub use view::display::{format_date, SearchLinks};
pub use view::filter::{visible_terms, StatusFilter, Tab, ViewState};
pub use view::stats::Progress;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
