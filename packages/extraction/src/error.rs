//! Typed errors for timetable extraction.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Extraction never
//! propagates these to callers as `Err`: they travel inside an
//! [`ExtractionOutcome`](crate::ExtractionOutcome) so the caller can decide
//! how to report a degraded source.

use chrono::NaiveDate;
use thiserror::Error;

/// Why a source did not yield scraped prayer times.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// Transport-level failure (DNS, TLS, connection reset, body read)
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Fetch exceeded the per-source timeout
    #[error("timed out after {millis}ms fetching {url}")]
    Timeout { url: String, millis: u64 },

    /// No table row carried today's date
    #[error("no timetable row matched {date}")]
    NoMatchingRow { date: NaiveDate },

    /// Text scan located too few prayers to be trusted
    #[error("text scan located only {found} of 5 daily prayers")]
    InsufficientHeuristicMatches { found: usize },

    /// A configured CSS selector failed to parse
    #[error("invalid selector `{selector}`")]
    InvalidSelector { selector: String },

    /// Source has no extraction procedure yet
    #[error("extraction not implemented for this source")]
    NotImplemented,
}

impl ExtractionError {
    /// Stable snake_case tag for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::Network { .. } => "network_error",
            ExtractionError::HttpStatus { .. } => "http_status",
            ExtractionError::Timeout { .. } => "timeout",
            ExtractionError::NoMatchingRow { .. } => "no_matching_row",
            ExtractionError::InsufficientHeuristicMatches { .. } => {
                "insufficient_heuristic_matches"
            }
            ExtractionError::InvalidSelector { .. } => "invalid_selector",
            ExtractionError::NotImplemented => "not_implemented",
        }
    }

    /// Whether the failure happened before any content was parsed.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ExtractionError::Network { .. }
                | ExtractionError::HttpStatus { .. }
                | ExtractionError::Timeout { .. }
        )
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
