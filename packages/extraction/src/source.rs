//! Timetable source definitions: where a mosque publishes its times and how
//! to read them.

use serde::Serialize;

use crate::strategy::ExtractionStrategy;
use crate::types::DailyTimes;

/// A page publishing one mosque's timetable, and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableSource {
    pub name: String,
    pub url: String,
    pub strategy: ExtractionStrategy,
    /// Fixed estimate used whenever extraction fails
    pub fallback: Option<DailyTimes>,
    /// Jummah is published as a weekly constant, not scraped
    pub jummah: Option<String>,
}

impl TimetableSource {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        strategy: ExtractionStrategy,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            strategy,
            fallback: None,
            jummah: None,
        }
    }

    /// Fixed fajr, dhuhr, asr, maghrib, isha values; jummah comes from [`Self::with_jummah`].
    pub fn with_fallback(mut self, daily: [&str; 5]) -> Self {
        let jummah = self.jummah.clone().unwrap_or_default();
        let mut fallback = DailyTimes::fixed(daily, &jummah);
        if jummah.is_empty() {
            fallback.jummah = None;
        }
        self.fallback = Some(fallback);
        self
    }

    pub fn with_jummah(mut self, jummah: impl Into<String>) -> Self {
        let jummah = jummah.into();
        if let Some(fallback) = self.fallback.as_mut() {
            fallback.jummah = Some(jummah.clone());
        }
        self.jummah = Some(jummah);
        self
    }

    /// The fallback record with this source's jummah applied.
    pub fn fallback_times(&self) -> Option<DailyTimes> {
        self.fallback
            .clone()
            .map(|times| times.with_jummah(self.jummah.clone()))
    }

    pub fn summary(&self) -> SourceSummary {
        SourceSummary {
            name: self.name.clone(),
            url: self.url.clone(),
            strategy: self.strategy.kind(),
            has_fallback: self.fallback.is_some(),
            jummah: self.jummah.clone(),
        }
    }
}

/// Serializable view of a source for listings.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub url: String,
    pub strategy: &'static str,
    pub has_fallback: bool,
    pub jummah: Option<String>,
}
