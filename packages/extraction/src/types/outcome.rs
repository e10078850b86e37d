use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::types::times::DailyTimes;

/// How the times in an outcome were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Read from the timetable row carrying today's date
    TableRow,
    /// Assembled from prayer-name/time co-occurrence in page text
    Heuristic,
    /// Scraping failed; the source's fixed estimate was used
    Fallback,
    /// Source is configured to publish fixed values only
    Static,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMethod::TableRow => write!(f, "table_row"),
            ExtractionMethod::Heuristic => write!(f, "heuristic"),
            ExtractionMethod::Fallback => write!(f, "fallback"),
            ExtractionMethod::Static => write!(f, "static"),
        }
    }
}

/// Result of running one source's extraction for one day.
///
/// Every variant except `Unavailable` carries a record that can be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Extracted {
        times: DailyTimes,
        method: ExtractionMethod,
    },
    Fallback {
        times: DailyTimes,
        cause: ExtractionError,
    },
    Static {
        times: DailyTimes,
    },
    Unavailable {
        cause: ExtractionError,
    },
}

impl ExtractionOutcome {
    pub fn times(&self) -> Option<&DailyTimes> {
        match self {
            ExtractionOutcome::Extracted { times, .. }
            | ExtractionOutcome::Fallback { times, .. }
            | ExtractionOutcome::Static { times } => Some(times),
            ExtractionOutcome::Unavailable { .. } => None,
        }
    }

    pub fn into_times(self) -> Option<DailyTimes> {
        match self {
            ExtractionOutcome::Extracted { times, .. }
            | ExtractionOutcome::Fallback { times, .. }
            | ExtractionOutcome::Static { times } => Some(times),
            ExtractionOutcome::Unavailable { .. } => None,
        }
    }

    pub fn method(&self) -> Option<ExtractionMethod> {
        match self {
            ExtractionOutcome::Extracted { method, .. } => Some(*method),
            ExtractionOutcome::Fallback { .. } => Some(ExtractionMethod::Fallback),
            ExtractionOutcome::Static { .. } => Some(ExtractionMethod::Static),
            ExtractionOutcome::Unavailable { .. } => None,
        }
    }

    /// The error that forced degradation, if any.
    pub fn cause(&self) -> Option<&ExtractionError> {
        match self {
            ExtractionOutcome::Fallback { cause, .. } | ExtractionOutcome::Unavailable { cause } => {
                Some(cause)
            }
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ExtractionOutcome::Unavailable { .. })
    }
}
