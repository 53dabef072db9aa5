//! `/terms` route table and handlers.
//!
//! # Responsibility
//! - Translate each request into exactly one `TermService` call.
//! - Answer writes with `{"success": true}` and never echo the record.
//!
//! # Invariants
//! - Handlers hold no state across requests; the only shared resource is
//!   the store connection.
//! - Store work runs on the blocking pool under the connection mutex, so
//!   writes are serialized.

use crate::error::ApiFailure;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use jargon_core::{
    Ack, ContentEdit, NewTerm, RepoResult, SqliteTermRepository, StatusChange, Term, TermService,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Shared handle to the process-wide store connection.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one service call on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T, ApiFailure>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&TermService<SqliteTermRepository<'conn>>) -> RepoResult<T>
            + Send
            + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| ApiFailure::internal("term store lock poisoned"))?;
            let service = TermService::new(SqliteTermRepository::new(&guard));
            op(&service).map_err(ApiFailure::from)
        })
        .await
        .map_err(|err| ApiFailure::internal(format!("term store task failed: {err}")))?
    }
}

/// Routes relative to the mount point.
pub fn term_routes() -> Router<AppState> {
    Router::new()
        .route("/terms", get(list_terms).post(create_term))
        .route("/terms/{id}", put(update_term).delete(delete_term))
        .route("/terms/{id}/toggle", put(toggle_term))
}

/// Full application with routes mounted under `base_path` (`""` for root).
pub fn app(state: AppState, base_path: &str) -> Router {
    let routes = term_routes();
    let router = if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(base_path, routes)
    };
    router.with_state(state)
}

async fn list_terms(State(state): State<AppState>) -> Result<Json<Vec<Term>>, ApiFailure> {
    let terms = state.run(|service| service.list_terms()).await?;
    Ok(Json(terms))
}

async fn create_term(
    State(state): State<AppState>,
    payload: Result<Json<NewTerm>, JsonRejection>,
) -> Result<Json<Ack>, ApiFailure> {
    let Json(new_term) = payload?;
    state.run(move |service| service.add_term(&new_term)).await?;
    Ok(Json(Ack::ok()))
}

async fn update_term(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ContentEdit>, JsonRejection>,
) -> Result<Json<Ack>, ApiFailure> {
    let Json(edit) = payload?;
    state
        .run(move |service| service.edit_term(&id, &edit))
        .await?;
    Ok(Json(Ack::ok()))
}

async fn toggle_term(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<Ack>, ApiFailure> {
    let Json(status) = payload?;
    state
        .run(move |service| service.set_status(&id, &status))
        .await?;
    Ok(Json(Ack::ok()))
}

async fn delete_term(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiFailure> {
    state
        .run(move |service| service.delete_term(&id))
        .await?;
    Ok(Json(Ack::ok()))
}
