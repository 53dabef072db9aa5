//! HTTP failure mapping.
//!
//! Every store failure is reported as `500 {"error": <message>}`; not-found,
//! duplicate ids and storage faults are not distinguished by status. A body
//! that is valid JSON but lacks or mistypes a field (for example
//! `"term": null`) is a rejected record and also answers `500`. Only bodies
//! that are not JSON at all, or not sent as JSON, answer `400`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jargon_core::{ErrorBody, RepoError};
use log::warn;

/// Error response produced by a handler.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<RepoError> for ApiFailure {
    fn from(value: RepoError) -> Self {
        Self::internal(value.to_string())
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(value: JsonRejection) -> Self {
        match value {
            JsonRejection::JsonDataError(_) => Self::internal(value.body_text()),
            _ => Self::bad_request(value.body_text()),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        warn!(
            "event=http_failure module=server status={} error={}",
            self.status.as_u16(),
            self.message
        );
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
