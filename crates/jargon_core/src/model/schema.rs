//! Declared mapping between wire fields and `terms` columns.
//!
//! # Responsibility
//! - Name every persisted column exactly once.
//! - Declare which columns each write path is allowed to touch.
//! - Render the SQL statements used by the repository from that table.
//!
//! # Invariants
//! - Column names equal the camelCase JSON field names of `Term`.
//! - Status columns never appear in the insert or content-edit sets.

/// Single persisted table.
pub const TERMS_TABLE: &str = "terms";

/// Every column of the `terms` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermColumn {
    Id,
    Term,
    Definition,
    Understood,
    DateAdded,
    DateUnderstood,
    InitialThoughts,
    Notes,
    Eli5,
}

impl TermColumn {
    /// All columns in table declaration order.
    pub const ALL: [TermColumn; 9] = [
        TermColumn::Id,
        TermColumn::Term,
        TermColumn::Definition,
        TermColumn::Understood,
        TermColumn::DateAdded,
        TermColumn::DateUnderstood,
        TermColumn::InitialThoughts,
        TermColumn::Notes,
        TermColumn::Eli5,
    ];

    /// Column name as declared in the schema and used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Term => "term",
            Self::Definition => "definition",
            Self::Understood => "understood",
            Self::DateAdded => "dateAdded",
            Self::DateUnderstood => "dateUnderstood",
            Self::InitialThoughts => "initialThoughts",
            Self::Notes => "notes",
            Self::Eli5 => "eli5",
        }
    }
}

/// Columns written by `POST /terms`.
pub const INSERT_COLUMNS: &[TermColumn] = &[
    TermColumn::Id,
    TermColumn::Term,
    TermColumn::Definition,
    TermColumn::DateAdded,
    TermColumn::InitialThoughts,
];

/// Columns written by a content edit.
pub const CONTENT_COLUMNS: &[TermColumn] = &[
    TermColumn::Term,
    TermColumn::Definition,
    TermColumn::Notes,
    TermColumn::Eli5,
];

/// Columns written by a status toggle, always together.
pub const STATUS_COLUMNS: &[TermColumn] = &[TermColumn::Understood, TermColumn::DateUnderstood];

/// `SELECT <all columns> FROM terms` in insertion order.
pub fn select_all_sql() -> String {
    format!(
        "SELECT {} FROM {TERMS_TABLE} ORDER BY rowid ASC;",
        column_list(&TermColumn::ALL)
    )
}

/// `INSERT INTO terms (...) VALUES (?1, ...)` over [`INSERT_COLUMNS`].
pub fn insert_sql() -> String {
    let placeholders = (1..=INSERT_COLUMNS.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {TERMS_TABLE} ({}) VALUES ({placeholders});",
        column_list(INSERT_COLUMNS)
    )
}

/// `UPDATE terms SET a = ?1, ... WHERE id = ?N` over the given columns.
///
/// The id placeholder is always the last one.
pub fn update_sql(columns: &[TermColumn]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{} = ?{}", column.name(), index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {TERMS_TABLE} SET {assignments} WHERE {} = ?{};",
        TermColumn::Id.name(),
        columns.len() + 1
    )
}

/// `DELETE FROM terms WHERE id = ?1`.
pub fn delete_sql() -> String {
    format!(
        "DELETE FROM {TERMS_TABLE} WHERE {} = ?1;",
        TermColumn::Id.name()
    )
}

fn column_list(columns: &[TermColumn]) -> String {
    columns
        .iter()
        .map(|column| column.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{
        insert_sql, update_sql, TermColumn, CONTENT_COLUMNS, INSERT_COLUMNS, STATUS_COLUMNS,
    };
    use crate::model::term::{ContentEdit, NewTerm, StatusChange, Term};
    use serde::Serialize;
    use std::collections::BTreeSet;

    fn json_keys(value: &impl Serialize) -> BTreeSet<String> {
        match serde_json::to_value(value).expect("value should serialize") {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("expected JSON object, got {other}"),
        }
    }

    fn column_names(columns: &[TermColumn]) -> BTreeSet<String> {
        columns.iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn insert_columns_match_create_payload_fields() {
        let payload = NewTerm {
            id: "1".to_string(),
            term: "API".to_string(),
            definition: None,
            date_added: "2024-01-01T00:00:00Z".to_string(),
            initial_thoughts: None,
        };
        assert_eq!(json_keys(&payload), column_names(INSERT_COLUMNS));
    }

    #[test]
    fn content_columns_match_edit_payload_fields() {
        let edit = ContentEdit {
            term: "API".to_string(),
            definition: None,
            notes: None,
            eli5: None,
        };
        assert_eq!(json_keys(&edit), column_names(CONTENT_COLUMNS));
    }

    #[test]
    fn status_columns_match_toggle_payload_fields() {
        assert_eq!(
            json_keys(&StatusChange::not_understood()),
            column_names(STATUS_COLUMNS)
        );
    }

    #[test]
    fn all_columns_match_full_record_fields() {
        let term = Term {
            id: "1".to_string(),
            term: "API".to_string(),
            definition: Some("d".to_string()),
            understood: true,
            date_added: "2024-01-01T00:00:00Z".to_string(),
            date_understood: Some("2024-01-02T00:00:00Z".to_string()),
            initial_thoughts: Some("t".to_string()),
            notes: Some("n".to_string()),
            eli5: Some("e".to_string()),
        };
        assert_eq!(json_keys(&term), column_names(&TermColumn::ALL));
    }

    #[test]
    fn content_and_status_paths_are_disjoint() {
        for column in STATUS_COLUMNS {
            assert!(!CONTENT_COLUMNS.contains(column));
            assert!(!INSERT_COLUMNS.contains(column));
        }
    }

    #[test]
    fn rendered_sql_uses_declared_names() {
        assert_eq!(
            insert_sql(),
            "INSERT INTO terms (id, term, definition, dateAdded, initialThoughts) VALUES (?1, ?2, ?3, ?4, ?5);"
        );
        assert_eq!(
            update_sql(STATUS_COLUMNS),
            "UPDATE terms SET understood = ?1, dateUnderstood = ?2 WHERE id = ?3;"
        );
    }
}
