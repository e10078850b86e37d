//! Prayer Timetable Extraction Library
//!
//! Best-effort extraction of today's prayer times from mosque websites.
//! Each source is described by a [`TimetableSource`] whose
//! [`ExtractionStrategy`] says how its page is read. Extraction degrades
//! instead of failing: a network error, a missing row or a thin text scan
//! yields the source's fixed fallback record (or `Unavailable` when it has
//! none), with the typed cause attached.
//!
//! # Usage
//!
//! ```rust,ignore
//! use prayer_extraction::{Extractor, HttpFetcher, TimetableSource, ExtractionStrategy, TableRowMatch};
//!
//! let fetcher = Arc::new(HttpFetcher::new(DEFAULT_USER_AGENT)?);
//! let extractor = Extractor::new(fetcher).with_timeout(Duration::from_secs(10));
//!
//! let source = TimetableSource::new("Central", "https://example.org/times", ExtractionStrategy::table(TableRowMatch::default()))
//!     .with_jummah("13:30")
//!     .with_fallback(["05:00", "13:15", "16:30", "20:15", "21:45"]);
//!
//! let outcome = extractor.extract(&source, today).await;
//! ```
//!
//! # Modules
//!
//! - [`strategy`] - Table-row matching and text heuristics
//! - [`fetchers`] - HTTP and mock page fetchers
//! - [`types`] - Daily times, outcomes and time normalisation

pub mod error;
pub mod extractor;
pub mod fetchers;
pub mod source;
pub mod strategy;
pub mod traits;
pub mod types;

pub use error::ExtractionError;
pub use extractor::{Extractor, DEFAULT_FETCH_TIMEOUT};
pub use fetchers::{HttpFetcher, MockFetcher, DEFAULT_USER_AGENT};
pub use source::{SourceSummary, TimetableSource};
pub use strategy::{ExtractionStrategy, HeuristicScan, TableRowMatch};
pub use traits::PageFetcher;
pub use types::{
    find_time_token, normalize_time, DailyTimes, ExtractionMethod, ExtractionOutcome, Prayer,
};
