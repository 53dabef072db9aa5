//! Term domain model.
//!
//! # Responsibility
//! - Define the canonical vocabulary record and its write-side shapes.
//! - Keep the understood flag and its timestamp moving as one pair.
//!
//! # Invariants
//! - `id` is client-generated, stable and never reused for another term.
//! - `date_added` is set once at creation and never rewritten.
//! - `understood == true` iff `date_understood` is set.
//! - Timestamps are stored verbatim as caller-provided text.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque identifier assigned by the client that creates the term.
pub type TermId = String;

/// Canonical vocabulary record as stored and listed.
///
/// Absent optional fields are omitted from JSON output, so a freshly added
/// term lists without `notes`, `eli5` or `dateUnderstood` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: TermId,
    /// Short display label.
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default)]
    pub understood: bool,
    /// ISO-8601 creation timestamp written by the client.
    pub date_added: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_understood: Option<String>,
    /// Captured at creation; no update path rewrites it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_thoughts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Simplified ("explain like I'm five") explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eli5: Option<String>,
}

impl Term {
    /// Applies a content edit, leaving the understood pair untouched.
    pub fn apply_edit(&mut self, edit: &ContentEdit) {
        self.term = edit.term.clone();
        self.definition = edit.definition.clone();
        self.notes = edit.notes.clone();
        self.eli5 = edit.eli5.clone();
    }

    /// Applies a status change, leaving content fields untouched.
    pub fn apply_status(&mut self, status: &StatusChange) {
        self.understood = status.understood;
        self.date_understood = status.date_understood.clone();
    }
}

/// Create payload (`POST /terms`).
///
/// Unknown keys such as `understood` are ignored on input; a new term is
/// always stored as not understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTerm {
    pub id: TermId,
    pub term: String,
    #[serde(default)]
    pub definition: Option<String>,
    pub date_added: String,
    #[serde(default)]
    pub initial_thoughts: Option<String>,
}

impl NewTerm {
    /// Returns the record the store holds right after inserting this payload.
    pub fn to_term(&self) -> Term {
        Term {
            id: self.id.clone(),
            term: self.term.clone(),
            definition: self.definition.clone(),
            understood: false,
            date_added: self.date_added.clone(),
            date_understood: None,
            initial_thoughts: self.initial_thoughts.clone(),
            notes: None,
            eli5: None,
        }
    }
}

/// Content edit payload (`PUT /terms/{id}`).
///
/// All four fields are overwritten; `None` clears the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEdit {
    pub term: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub eli5: Option<String>,
}

impl ContentEdit {
    /// Builds an edit that rewrites nothing, prefilled from the current record.
    pub fn from_term(term: &Term) -> Self {
        Self {
            term: term.term.clone(),
            definition: term.definition.clone(),
            notes: term.notes.clone(),
            eli5: term.eli5.clone(),
        }
    }
}

/// Status toggle payload (`PUT /terms/{id}/toggle`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub understood: bool,
    #[serde(default)]
    pub date_understood: Option<String>,
}

impl StatusChange {
    /// Marks a term understood at the given timestamp.
    pub fn understood_at(timestamp: impl Into<String>) -> Self {
        Self {
            understood: true,
            date_understood: Some(timestamp.into()),
        }
    }

    /// Marks a term not understood and clears its timestamp.
    pub fn not_understood() -> Self {
        Self {
            understood: false,
            date_understood: None,
        }
    }

    /// Checks that flag and timestamp agree.
    pub fn validate(&self) -> Result<(), TermValidationError> {
        match (self.understood, self.date_understood.as_deref()) {
            (true, None) => Err(TermValidationError::UnderstoodWithoutDate),
            (true, Some(date)) if date.trim().is_empty() => {
                Err(TermValidationError::UnderstoodWithoutDate)
            }
            (false, Some(_)) => Err(TermValidationError::DateWithoutUnderstood),
            _ => Ok(()),
        }
    }
}

/// Validation failures for term write shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermValidationError {
    /// Term label is empty after trimming.
    EmptyLabel,
    /// `understood = true` was sent without a timestamp.
    UnderstoodWithoutDate,
    /// A timestamp was sent while clearing `understood`.
    DateWithoutUnderstood,
}

impl Display for TermValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "term label cannot be empty"),
            Self::UnderstoodWithoutDate => {
                write!(f, "understood term requires a dateUnderstood timestamp")
            }
            Self::DateWithoutUnderstood => {
                write!(f, "dateUnderstood must be cleared when understood is false")
            }
        }
    }
}

impl Error for TermValidationError {}
