//! Page fetching seam.
//!
//! Extraction strategies only ever see HTML strings; everything network
//! related sits behind [`PageFetcher`] so tests can swap in
//! [`MockFetcher`](crate::fetchers::MockFetcher).

use async_trait::async_trait;

use crate::error::Result;

/// Fetches the raw body of a timetable page.
///
/// Implementations report transport failures and non-success statuses as
/// [`ExtractionError`](crate::ExtractionError) values; they never panic.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}
