//! Term use-case service.
//!
//! # Responsibility
//! - Provide the five store operations behind the HTTP surface.
//! - Emit metadata-only diagnostic events for each write.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - No server-side validation of content (an empty label is stored as sent).
//! - Term text is never logged; only ids and outcomes are.

use crate::model::term::{ContentEdit, NewTerm, StatusChange, Term};
use crate::repo::term_repo::{RepoResult, TermRepository};
use log::{debug, info, warn};

/// Use-case service wrapper for term storage.
pub struct TermService<R: TermRepository> {
    repo: R,
}

impl<R: TermRepository> TermService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the full collection; there is no pagination.
    pub fn list_terms(&self) -> RepoResult<Vec<Term>> {
        let terms = self.repo.list_terms();
        match &terms {
            Ok(items) => debug!(
                "event=term_list module=service status=ok count={}",
                items.len()
            ),
            Err(err) => warn!("event=term_list module=service status=error error={err}"),
        }
        terms
    }

    /// Stores a client-built term verbatim.
    pub fn add_term(&self, new_term: &NewTerm) -> RepoResult<()> {
        let result = self.repo.insert_term(new_term);
        log_write("term_add", &new_term.id, &result);
        result
    }

    /// Overwrites the four editable content fields.
    pub fn edit_term(&self, id: &str, edit: &ContentEdit) -> RepoResult<()> {
        let result = self.repo.update_content(id, edit);
        log_write("term_edit", id, &result);
        result
    }

    /// Overwrites the understood flag and its timestamp as one pair.
    pub fn set_status(&self, id: &str, status: &StatusChange) -> RepoResult<()> {
        let result = self.repo.update_status(id, status);
        log_write("term_toggle", id, &result);
        result
    }

    /// Hard-deletes a term. Absent ids are a successful no-op.
    pub fn delete_term(&self, id: &str) -> RepoResult<()> {
        match self.repo.delete_term(id) {
            Ok(existed) => {
                info!("event=term_delete module=service status=ok term_id={id} existed={existed}");
                Ok(())
            }
            Err(err) => {
                warn!("event=term_delete module=service status=error term_id={id} error={err}");
                Err(err)
            }
        }
    }
}

fn log_write(event: &str, id: &str, result: &RepoResult<()>) {
    match result {
        Ok(()) => info!("event={event} module=service status=ok term_id={id}"),
        Err(err) => warn!("event={event} module=service status=error term_id={id} error={err}"),
    }
}
