//! Display helpers for individual terms.

use chrono::DateTime;
use url::form_urlencoded::byte_serialize;

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search?q=";
const WIKIPEDIA_SEARCH_URL: &str = "https://en.wikipedia.org/w/index.php?search=";

/// Formats an RFC 3339 timestamp as `Jan 1, 2024`.
///
/// Values that do not parse are returned unchanged.
pub fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.format("%b %-d, %Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// External lookup links for a term label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLinks {
    pub google: String,
    pub wikipedia: String,
}

impl SearchLinks {
    pub fn for_label(label: &str) -> Self {
        let encoded: String = byte_serialize(label.as_bytes()).collect();
        Self {
            google: format!("{GOOGLE_SEARCH_URL}{encoded}"),
            wikipedia: format!("{WIKIPEDIA_SEARCH_URL}{encoded}"),
        }
    }
}
