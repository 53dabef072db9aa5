//! Term repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/insert/edit/status/delete over the `terms` table.
//! - Keep SQL inside the persistence boundary, rendered from the declared
//!   column table in `model::schema`.
//!
//! # Invariants
//! - Content edits and status changes are separate statements over disjoint
//!   column sets.
//! - Status writes call `StatusChange::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Deleting an absent id succeeds.

use crate::db::DbError;
use crate::model::schema::{
    delete_sql, insert_sql, select_all_sql, update_sql, TermColumn, CONTENT_COLUMNS,
    INSERT_COLUMNS, STATUS_COLUMNS,
};
use crate::model::term::{ContentEdit, NewTerm, StatusChange, Term, TermId, TermValidationError};
use rusqlite::types::Value;
use rusqlite::{ffi, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for term persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TermValidationError),
    Db(DbError),
    NotFound(TermId),
    DuplicateId(TermId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "term not found: {id}"),
            Self::DuplicateId(id) => write!(f, "term id already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted term data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TermValidationError> for RepoError {
    fn from(value: TermValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for term storage.
pub trait TermRepository {
    /// Returns every term in insertion order.
    fn list_terms(&self) -> RepoResult<Vec<Term>>;
    /// Inserts a new term; fails with `DuplicateId` when the id exists.
    /// Other constraint failures surface as `Db`.
    fn insert_term(&self, new_term: &NewTerm) -> RepoResult<()>;
    /// Overwrites term/definition/notes/eli5 only.
    fn update_content(&self, id: &str, edit: &ContentEdit) -> RepoResult<()>;
    /// Overwrites understood/dateUnderstood together.
    fn update_status(&self, id: &str, status: &StatusChange) -> RepoResult<()>;
    /// Removes a term; returns whether a row existed.
    fn delete_term(&self, id: &str) -> RepoResult<bool>;
}

/// SQLite-backed term repository borrowing a migrated connection.
pub struct SqliteTermRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTermRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn execute_update(
        &self,
        id: &str,
        columns: &[TermColumn],
        mut values: Vec<Value>,
    ) -> RepoResult<()> {
        values.push(Value::Text(id.to_string()));

        let changed = self
            .conn
            .execute(&update_sql(columns), params_from_iter(values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl TermRepository for SqliteTermRepository<'_> {
    fn list_terms(&self) -> RepoResult<Vec<Term>> {
        let mut stmt = self.conn.prepare(&select_all_sql())?;
        let mut rows = stmt.query([])?;
        let mut terms = Vec::new();

        while let Some(row) = rows.next()? {
            terms.push(parse_term_row(row)?);
        }

        Ok(terms)
    }

    fn insert_term(&self, new_term: &NewTerm) -> RepoResult<()> {
        let values = INSERT_COLUMNS
            .iter()
            .map(|column| insert_value(new_term, *column))
            .collect::<RepoResult<Vec<_>>>()?;

        match self.conn.execute(&insert_sql(), params_from_iter(values)) {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Err(RepoError::DuplicateId(new_term.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_content(&self, id: &str, edit: &ContentEdit) -> RepoResult<()> {
        let values = CONTENT_COLUMNS
            .iter()
            .map(|column| content_value(edit, *column))
            .collect::<RepoResult<Vec<_>>>()?;
        self.execute_update(id, CONTENT_COLUMNS, values)
    }

    fn update_status(&self, id: &str, status: &StatusChange) -> RepoResult<()> {
        status.validate()?;

        let values = STATUS_COLUMNS
            .iter()
            .map(|column| status_value(status, *column))
            .collect::<RepoResult<Vec<_>>>()?;
        self.execute_update(id, STATUS_COLUMNS, values)
    }

    fn delete_term(&self, id: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(&delete_sql(), [id])?;
        Ok(changed > 0)
    }
}

fn insert_value(new_term: &NewTerm, column: TermColumn) -> RepoResult<Value> {
    let value = match column {
        TermColumn::Id => text(&new_term.id),
        TermColumn::Term => text(&new_term.term),
        TermColumn::Definition => optional_text(new_term.definition.as_deref()),
        TermColumn::DateAdded => text(&new_term.date_added),
        TermColumn::InitialThoughts => optional_text(new_term.initial_thoughts.as_deref()),
        other => return Err(unwritable(other, "insert")),
    };
    Ok(value)
}

fn content_value(edit: &ContentEdit, column: TermColumn) -> RepoResult<Value> {
    let value = match column {
        TermColumn::Term => text(&edit.term),
        TermColumn::Definition => optional_text(edit.definition.as_deref()),
        TermColumn::Notes => optional_text(edit.notes.as_deref()),
        TermColumn::Eli5 => optional_text(edit.eli5.as_deref()),
        other => return Err(unwritable(other, "content edit")),
    };
    Ok(value)
}

fn status_value(status: &StatusChange, column: TermColumn) -> RepoResult<Value> {
    let value = match column {
        TermColumn::Understood => Value::Integer(bool_to_int(status.understood)),
        TermColumn::DateUnderstood => optional_text(status.date_understood.as_deref()),
        other => return Err(unwritable(other, "status change")),
    };
    Ok(value)
}

fn unwritable(column: TermColumn, path: &str) -> RepoError {
    RepoError::InvalidData(format!(
        "column `{}` is not writable by {path}",
        column.name()
    ))
}

fn parse_term_row(row: &Row<'_>) -> RepoResult<Term> {
    let understood = match row.get::<_, Option<i64>>(TermColumn::Understood.name())? {
        None | Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid understood value `{other}` in terms.understood"
            )));
        }
    };

    Ok(Term {
        id: row.get(TermColumn::Id.name())?,
        term: row.get(TermColumn::Term.name())?,
        definition: row.get(TermColumn::Definition.name())?,
        understood,
        date_added: row.get(TermColumn::DateAdded.name())?,
        date_understood: row.get(TermColumn::DateUnderstood.name())?,
        initial_thoughts: row.get(TermColumn::InitialThoughts.name())?,
        notes: row.get(TermColumn::Notes.name())?,
        eli5: row.get(TermColumn::Eli5.name())?,
    })
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
