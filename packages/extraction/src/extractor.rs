//! Runs a source's strategy with a bounded fetch and degrades to fallbacks.
//!
//! `extract` is infallible by contract: every failure ends up either as the
//! source's fallback record or as `Unavailable`, never as an `Err`.

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result};
use crate::source::TimetableSource;
use crate::strategy::ExtractionStrategy;
use crate::traits::PageFetcher;
use crate::types::ExtractionOutcome;

/// Per-source fetch timeout when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct Extractor {
    fetcher: Arc<dyn PageFetcher>,
    timeout: Duration,
}

impl Extractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Produce `source`'s prayer times for `today`.
    pub async fn extract(&self, source: &TimetableSource, today: NaiveDate) -> ExtractionOutcome {
        match &source.strategy {
            ExtractionStrategy::StaticOnly => match source.fallback_times() {
                Some(times) => {
                    debug!(source = %source.name, "Using static times");
                    ExtractionOutcome::Static { times }
                }
                None => ExtractionOutcome::Unavailable {
                    cause: ExtractionError::NotImplemented,
                },
            },
            ExtractionStrategy::NotImplemented => ExtractionOutcome::Unavailable {
                cause: ExtractionError::NotImplemented,
            },
            strategy => {
                let result = match self.fetch(&source.url).await {
                    Ok(html) => strategy.apply(&html, today),
                    Err(e) => Err(e),
                };

                match result {
                    Ok((mut times, method)) => {
                        times.jummah = source.jummah.clone();
                        if let Some(fallback) = &source.fallback {
                            times.fill_missing_from(fallback);
                        }
                        info!(source = %source.name, method = %method, "Extracted prayer times");
                        ExtractionOutcome::Extracted { times, method }
                    }
                    Err(cause) => Self::degrade(source, cause),
                }
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.fetcher.fetch(url)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractionError::Timeout {
                url: url.to_string(),
                millis: self.timeout.as_millis() as u64,
            }),
        }
    }

    fn degrade(source: &TimetableSource, cause: ExtractionError) -> ExtractionOutcome {
        match source.fallback_times() {
            Some(times) => {
                warn!(
                    source = %source.name,
                    error = %cause,
                    kind = cause.kind(),
                    "Extraction failed, using fallback times"
                );
                ExtractionOutcome::Fallback { times, cause }
            }
            None => {
                warn!(
                    source = %source.name,
                    error = %cause,
                    kind = cause.kind(),
                    "Extraction failed and source has no fallback"
                );
                ExtractionOutcome::Unavailable { cause }
            }
        }
    }
}
