//! Client-side term cache.
//!
//! # Responsibility
//! - Own the in-memory copy of the whole term collection.
//! - Turn user actions into `TermApi` calls and patch local state after the
//!   service confirms them.
//!
//! # Invariants
//! - Local state changes only after a successful call; a failed call leaves
//!   it untouched and is returned to the caller.
//! - Ids and `dateAdded` are synthesized here, never by the service.
//! - Toggling always sends `understood` and `dateUnderstood` together:
//!   a timestamp when turning on, `None` when turning off.
//! - Every action takes `&mut self`, so one cache never races itself.

use crate::client::api::{ApiError, TermApi};
use crate::model::term::{ContentEdit, NewTerm, StatusChange, Term, TermId, TermValidationError};
use chrono::{SecondsFormat, Utc};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure of a cache action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Input rejected before any request was sent.
    Validation(TermValidationError),
    /// The id is not present in the local collection.
    UnknownTerm(TermId),
    /// The request failed; local state was left unchanged.
    Api(ApiError),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnknownTerm(id) => write!(f, "term not loaded: {id}"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Api(err) => Some(err),
            Self::UnknownTerm(_) => None,
        }
    }
}

impl From<TermValidationError> for ClientError {
    fn from(value: TermValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ApiError> for ClientError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

/// Source of "now" timestamps, injectable for tests.
pub type Clock = Box<dyn Fn() -> String + Send + Sync>;

/// Current UTC time as RFC 3339 with millisecond precision (`...Z`).
pub fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Owned, explicitly constructed term cache over a transport.
pub struct TermCache<A: TermApi> {
    api: A,
    terms: Vec<Term>,
    clock: Clock,
}

impl<A: TermApi> TermCache<A> {
    /// Creates an empty cache using the system clock.
    pub fn new(api: A) -> Self {
        Self::with_clock(api, Box::new(utc_now))
    }

    /// Creates an empty cache with a caller-provided clock.
    pub fn with_clock(api: A, clock: Clock) -> Self {
        Self {
            api,
            terms: Vec::new(),
            clock,
        }
    }

    /// Current local collection, in service order plus local appends.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Looks up one loaded term.
    pub fn get(&self, id: &str) -> Option<&Term> {
        self.terms.iter().find(|term| term.id == id)
    }

    /// Borrow of the underlying transport.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches the full collection and replaces local state wholesale.
    ///
    /// Returns the number of loaded terms.
    pub fn load(&mut self) -> ClientResult<usize> {
        match self.api.fetch_terms() {
            Ok(terms) => {
                self.terms = terms;
                debug!(
                    "event=cache_load module=client status=ok count={}",
                    self.terms.len()
                );
                Ok(self.terms.len())
            }
            Err(err) => Err(failed("cache_load", None, err)),
        }
    }

    /// Re-fetches after a failed action so local state matches the service.
    pub fn reconcile(&mut self) -> ClientResult<usize> {
        debug!("event=cache_reconcile module=client status=start");
        self.load()
    }

    /// Adds a new term.
    ///
    /// Inputs are trimmed; an empty label is rejected without a request. On
    /// success the synthesized record is appended and returned.
    pub fn add_term(
        &mut self,
        term: &str,
        definition: &str,
        initial_thoughts: &str,
    ) -> ClientResult<Term> {
        let label = non_empty_label(term)?;
        let new_term = NewTerm {
            id: Uuid::new_v4().to_string(),
            term: label,
            definition: Some(definition.trim().to_string()),
            date_added: (self.clock)(),
            initial_thoughts: Some(initial_thoughts.trim().to_string()),
        };

        if let Err(err) = self.api.create_term(&new_term) {
            return Err(failed("cache_add", Some(new_term.id.as_str()), err));
        }

        let record = new_term.to_term();
        self.terms.push(record.clone());
        debug!(
            "event=cache_add module=client status=ok term_id={}",
            record.id
        );
        Ok(record)
    }

    /// Sends the four editable fields and merges them on success.
    ///
    /// Text fields are trimmed; an empty label is rejected without a request.
    pub fn update_term(&mut self, id: &str, edit: ContentEdit) -> ClientResult<()> {
        let edit = ContentEdit {
            term: non_empty_label(&edit.term)?,
            definition: trimmed(edit.definition),
            notes: trimmed(edit.notes),
            eli5: trimmed(edit.eli5),
        };

        if let Err(err) = self.api.update_term(id, &edit) {
            return Err(failed("cache_update", Some(id), err));
        }

        if let Some(term) = self.terms.iter_mut().find(|term| term.id == id) {
            term.apply_edit(&edit);
        }
        debug!("event=cache_update module=client status=ok term_id={id}");
        Ok(())
    }

    /// Flips a loaded term's understood flag.
    ///
    /// Returns the status that was sent and applied locally.
    pub fn toggle_understood(&mut self, id: &str) -> ClientResult<StatusChange> {
        let current = self
            .get(id)
            .ok_or_else(|| ClientError::UnknownTerm(id.to_string()))?;

        let status = if current.understood {
            StatusChange::not_understood()
        } else {
            StatusChange::understood_at((self.clock)())
        };

        if let Err(err) = self.api.toggle_term(id, &status) {
            return Err(failed("cache_toggle", Some(id), err));
        }

        if let Some(term) = self.terms.iter_mut().find(|term| term.id == id) {
            term.apply_status(&status);
        }
        debug!(
            "event=cache_toggle module=client status=ok term_id={id} understood={}",
            status.understood
        );
        Ok(status)
    }

    /// Deletes a term remotely, then locally.
    pub fn delete_term(&mut self, id: &str) -> ClientResult<()> {
        if let Err(err) = self.api.delete_term(id) {
            return Err(failed("cache_delete", Some(id), err));
        }

        self.terms.retain(|term| term.id != id);
        debug!("event=cache_delete module=client status=ok term_id={id}");
        Ok(())
    }
}

fn failed(event: &str, id: Option<&str>, err: ApiError) -> ClientError {
    warn!(
        "event={event} module=client status=error term_id={} error={err}",
        id.unwrap_or("-")
    );
    ClientError::Api(err)
}

fn non_empty_label(value: &str) -> Result<String, TermValidationError> {
    let label = value.trim();
    if label.is_empty() {
        return Err(TermValidationError::EmptyLabel);
    }
    Ok(label.to_string())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|text| text.trim().to_string())
}
