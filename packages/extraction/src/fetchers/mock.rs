//! Mock fetcher for testing.
//!
//! Provides canned bodies, canned failures and artificial latency per URL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ExtractionError, Result};
use crate::traits::PageFetcher;

#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Failure(ExtractionError),
}

/// Mock fetcher for testing.
///
/// URLs without a configured response fail with a 404 `HttpStatus` error.
///
/// # Example
///
/// ```rust
/// use prayer_extraction::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://example.org/times", "<table></table>");
/// assert_eq!(mock.fetch_call_count(), 0);
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn add_page(&self, url: impl Into<String>, body: impl Into<String>) {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Body(body.into()));
    }

    /// Fail every fetch of `url` with `error`.
    pub fn add_failure(&self, url: impl Into<String>, error: ExtractionError) {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Failure(error));
    }

    /// Sleep for `delay` before answering `url`.
    pub fn add_delay(&self, url: impl Into<String>, delay: Duration) {
        self.delays.write().unwrap().insert(url.into(), delay);
    }

    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_page(url, body);
        self
    }

    pub fn with_failure(self, url: impl Into<String>, error: ExtractionError) -> Self {
        self.add_failure(url, error);
        self
    }

    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.add_delay(url, delay);
        self
    }

    /// Number of fetches performed so far.
    pub fn fetch_call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// URLs fetched, in call order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn was_fetched(&self, url: &str) -> bool {
        self.calls.read().unwrap().iter().any(|u| u == url)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.write().unwrap().push(url.to_string());

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.read().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Failure(error)) => Err(error),
            None => Err(ExtractionError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn serves_configured_pages_and_records_calls() {
        let mock = MockFetcher::new().with_page("https://a.test/", "<p>hi</p>");

        assert_eq!(assert_ok!(mock.fetch("https://a.test/").await), "<p>hi</p>");
        assert_err!(mock.fetch("https://b.test/").await);
        assert_eq!(
            mock.fetch_calls(),
            vec!["https://a.test/".to_string(), "https://b.test/".to_string()]
        );
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mock = MockFetcher::new();
        let handle = mock.clone();
        handle.add_failure(
            "https://down.test/",
            ExtractionError::Network {
                url: "https://down.test/".into(),
                message: "connection refused".into(),
            },
        );

        let err = mock.fetch("https://down.test/").await.unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(handle.was_fetched("https://down.test/"));
    }
}
