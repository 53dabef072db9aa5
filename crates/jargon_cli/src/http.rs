//! Blocking HTTP transport for `TermCache`.
//!
//! # Responsibility
//! - Map the five `TermApi` operations onto the `/terms` routes.
//! - Classify failures: no response is `Transport`, a non-2xx answer is
//!   `Rejected` with the service's `{error}` message, and an unreadable body
//!   is `Decode`.
//!
//! # Invariants
//! - Every request is bounded by the agent timeout.
//! - Ids are percent-encoded as single path segments.

use jargon_core::{Ack, ApiError, ApiResult, ContentEdit, ErrorBody, NewTerm, StatusChange, Term, TermApi};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use ureq::{Agent, AgentBuilder, Response};
use url::Url;

/// Rejected `--server` value.
#[derive(Debug)]
pub enum BaseUrlError {
    Parse(url::ParseError),
    /// The URL has no hierarchical path to append `/terms` to.
    NotHierarchical(String),
}

impl Display for BaseUrlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid server url: {err}"),
            Self::NotHierarchical(url) => write!(f, "server url cannot carry a path: {url}"),
        }
    }
}

impl Error for BaseUrlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::NotHierarchical(_) => None,
        }
    }
}

impl From<url::ParseError> for BaseUrlError {
    fn from(value: url::ParseError) -> Self {
        Self::Parse(value)
    }
}

/// `TermApi` over HTTP/JSON.
pub struct HttpTermApi {
    agent: Agent,
    base: Url,
}

impl HttpTermApi {
    /// Builds a client for the API mounted at `base`, for example
    /// `http://127.0.0.1:3000/api`.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, BaseUrlError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(BaseUrlError::NotHierarchical(base.to_string()));
        }
        Ok(Self {
            agent: AgentBuilder::new().timeout(timeout).build(),
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for the given path segments below the base.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked hierarchical in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn log_request(method: &str, url: &Url) {
        debug!(
            "event=http_request module=client method={method} path={}",
            url.path()
        );
    }
}

impl TermApi for HttpTermApi {
    fn fetch_terms(&self) -> ApiResult<Vec<Term>> {
        let url = self.endpoint(&["terms"]);
        Self::log_request("GET", &url);
        let response = self.agent.get(url.as_str()).call().map_err(classify)?;
        response
            .into_json::<Vec<Term>>()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn create_term(&self, new_term: &NewTerm) -> ApiResult<()> {
        let url = self.endpoint(&["terms"]);
        Self::log_request("POST", &url);
        let response = self
            .agent
            .post(url.as_str())
            .send_json(new_term)
            .map_err(classify)?;
        acknowledged(response)
    }

    fn update_term(&self, id: &str, edit: &ContentEdit) -> ApiResult<()> {
        let url = self.endpoint(&["terms", id]);
        Self::log_request("PUT", &url);
        let response = self
            .agent
            .put(url.as_str())
            .send_json(edit)
            .map_err(classify)?;
        acknowledged(response)
    }

    fn toggle_term(&self, id: &str, status: &StatusChange) -> ApiResult<()> {
        let url = self.endpoint(&["terms", id, "toggle"]);
        Self::log_request("PUT", &url);
        let response = self
            .agent
            .put(url.as_str())
            .send_json(status)
            .map_err(classify)?;
        acknowledged(response)
    }

    fn delete_term(&self, id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["terms", id]);
        Self::log_request("DELETE", &url);
        let response = self.agent.delete(url.as_str()).call().map_err(classify)?;
        acknowledged(response)
    }
}

fn acknowledged(response: Response) -> ApiResult<()> {
    let status = response.status();
    let ack = response
        .into_json::<Ack>()
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    if !ack.success {
        return Err(ApiError::Rejected {
            status,
            message: "request was not acknowledged".to_string(),
        });
    }
    Ok(())
}

fn classify(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_json::<ErrorBody>()
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            ApiError::Rejected { status, message }
        }
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{BaseUrlError, HttpTermApi};
    use std::time::Duration;

    fn api(base: &str) -> HttpTermApi {
        HttpTermApi::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn endpoints_append_to_base_path() {
        let api = api("http://127.0.0.1:3000/api");
        assert_eq!(
            api.endpoint(&["terms"]).as_str(),
            "http://127.0.0.1:3000/api/terms"
        );
        assert_eq!(
            api.endpoint(&["terms", "abc", "toggle"]).as_str(),
            "http://127.0.0.1:3000/api/terms/abc/toggle"
        );
    }

    #[test]
    fn trailing_slash_and_root_base_are_handled() {
        assert_eq!(
            api("http://localhost:3000/api/").endpoint(&["terms"]).as_str(),
            "http://localhost:3000/api/terms"
        );
        assert_eq!(
            api("http://localhost:3000").endpoint(&["terms"]).as_str(),
            "http://localhost:3000/terms"
        );
    }

    #[test]
    fn ids_are_encoded_as_one_segment() {
        let url = api("http://localhost:3000/api").endpoint(&["terms", "a/b c"]);
        assert_eq!(url.as_str(), "http://localhost:3000/api/terms/a%2Fb%20c");
    }

    #[test]
    fn unusable_base_urls_are_rejected() {
        assert!(matches!(
            HttpTermApi::new("not a url", Duration::from_secs(1)),
            Err(BaseUrlError::Parse(_))
        ));
        assert!(matches!(
            HttpTermApi::new("mailto:someone@example.com", Duration::from_secs(1)),
            Err(BaseUrlError::NotHierarchical(_))
        ));
    }
}
