// Data source module
// Backend contract, payload parsing and the async fetch dispatcher

mod dispatcher;
mod http;

pub use dispatcher::{FetchCompletion, FetchDispatcher};
pub use http::HttpDataSource;

use thiserror::Error;

use crate::app::state::ProjectFilter;
use crate::models::record::RecordSet;

/// Why a fetch produced no record set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error while contacting {url}: {message}")]
    Network { url: String, message: String },
    #[error("Backend answered with HTTP status {0}")]
    Status(u16),
    #[error("Backend response too large ({size} bytes > {limit} bytes)")]
    TooLarge { size: u64, limit: usize },
    #[error("Backend response is not valid UTF-8")]
    InvalidUtf8,
    #[error("Backend returned non-JSON content: {0}")]
    NotJson(String),
    #[error("Failed to parse backend payload: {0}")]
    Parse(String),
}

impl FetchError {
    /// Transport failures and server errors are worth another attempt;
    /// a well-formed but unusable response is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status(status) => *status >= 500,
            _ => false,
        }
    }
}

/// Identifies one issued fetch. Generations grow monotonically per session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub generation: u64,
    pub filter: ProjectFilter,
}

/// Anything that can answer "records for this filter".
#[cfg_attr(test, mockall::automock)]
pub trait CalendarDataSource: Send + Sync {
    fn fetch(&self, filter: &ProjectFilter) -> Result<RecordSet, FetchError>;
}

/// Decode a response body into a [`RecordSet`].
///
/// PHP backends answer errors with an HTML page and a 200 status, so a body
/// that opens with markup is rejected before JSON parsing.
pub fn parse_payload(body: &str) -> Result<RecordSet, FetchError> {
    let trimmed = body.trim_start_matches('\u{feff}').trim_start();
    if trimmed.starts_with('<') {
        return Err(FetchError::NotJson(excerpt(trimmed)));
    }
    if trimmed.is_empty() {
        return Err(FetchError::NotJson("empty body".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|err| FetchError::Parse(err.to_string()))
}

fn excerpt(body: &str) -> String {
    const LIMIT: usize = 60;
    let first_line = body.lines().next().unwrap_or_default();
    if first_line.chars().count() > LIMIT {
        let cut: String = first_line.chars().take(LIMIT).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}
