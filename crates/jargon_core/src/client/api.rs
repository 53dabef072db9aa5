//! Transport contract between the client cache and the term service.
//!
//! # Responsibility
//! - Describe the five remote operations the cache depends on.
//! - Classify failures as transport, rejection or decode problems.
//!
//! # Invariants
//! - A successful call carries no record back; callers trust the payload
//!   they sent.

use crate::model::term::{ContentEdit, NewTerm, StatusChange, Term};
use crate::repo::term_repo::{RepoError, TermRepository};
use crate::service::term_service::TermService;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure reported by a `TermApi` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, I/O).
    Transport(String),
    /// The service answered with a non-success status.
    Rejected { status: u16, message: String },
    /// The response body could not be decoded.
    Decode(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::Rejected { status, message } => {
                write!(f, "request rejected with status {status}: {message}")
            }
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Rejected {
            status: 500,
            message: value.to_string(),
        }
    }
}

/// Remote operations used by `TermCache`.
pub trait TermApi {
    fn fetch_terms(&self) -> ApiResult<Vec<Term>>;
    fn create_term(&self, new_term: &NewTerm) -> ApiResult<()>;
    fn update_term(&self, id: &str, edit: &ContentEdit) -> ApiResult<()>;
    fn toggle_term(&self, id: &str, status: &StatusChange) -> ApiResult<()>;
    fn delete_term(&self, id: &str) -> ApiResult<()>;
}

/// In-process transport: the cache talks to a service directly, with store
/// failures reported the way the HTTP layer reports them (status 500).
impl<R: TermRepository> TermApi for TermService<R> {
    fn fetch_terms(&self) -> ApiResult<Vec<Term>> {
        Ok(self.list_terms()?)
    }

    fn create_term(&self, new_term: &NewTerm) -> ApiResult<()> {
        Ok(self.add_term(new_term)?)
    }

    fn update_term(&self, id: &str, edit: &ContentEdit) -> ApiResult<()> {
        Ok(self.edit_term(id, edit)?)
    }

    fn toggle_term(&self, id: &str, status: &StatusChange) -> ApiResult<()> {
        Ok(self.set_status(id, status)?)
    }

    fn delete_term(&self, id: &str) -> ApiResult<()> {
        Ok(TermService::delete_term(self, id)?)
    }
}
