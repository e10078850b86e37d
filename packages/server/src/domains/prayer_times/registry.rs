//! Known timetable sources.
//!
//! The registry is fixed at process start. Each descriptor ties a
//! [`TimetableSource`] to the external id of the mosque it publishes for.

use prayer_extraction::{ExtractionStrategy, TableRowMatch, TimetableSource};
use serde::Serialize;

const JUMMAH: &str = "13:30";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Matches `mosques.osm_id` once provisioned
    pub external_id: String,
    pub source: TimetableSource,
}

impl SourceDescriptor {
    pub fn new(external_id: impl Into<String>, source: TimetableSource) -> Self {
        Self {
            external_id: external_id.into(),
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.source.name
    }

    pub fn url(&self) -> &str {
        &self.source.url
    }
}

/// Listing row for `ingest_cli sources`
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorSummary {
    pub external_id: String,
    #[serde(flatten)]
    pub source: prayer_extraction::SourceSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRegistry {
    descriptors: Vec<SourceDescriptor>,
}

impl SourceRegistry {
    pub fn new(descriptors: Vec<SourceDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The Manchester sources the directory launched with.
    pub fn manchester() -> Self {
        Self::new(vec![
            SourceDescriptor::new(
                "2028166730",
                TimetableSource::new(
                    "Manchester Central Mosque",
                    "https://www.manchestercentralmosque.org/prayer-times/",
                    ExtractionStrategy::table(TableRowMatch::default()),
                )
                .with_jummah(JUMMAH)
                .with_fallback(["05:00", "13:15", "16:30", "20:15", "21:45"]),
            ),
            SourceDescriptor::new(
                "305477399",
                TimetableSource::new(
                    "Didsbury Mosque",
                    "https://www.didsburymosque.com/prayer-times/",
                    ExtractionStrategy::table(
                        TableRowMatch::new(".prayer-times, .salah-times, .timetable, table")
                            .with_weekday_match(),
                    ),
                )
                .with_jummah(JUMMAH)
                .with_fallback(["05:15", "13:00", "16:45", "20:30", "22:00"]),
            ),
            SourceDescriptor::new(
                "305477499",
                TimetableSource::new(
                    "Victoria Park Mosque",
                    "https://victoriaparkmasjid.org/",
                    ExtractionStrategy::StaticOnly,
                )
                .with_jummah(JUMMAH)
                .with_fallback(["05:30", "13:15", "17:00", "20:45", "22:15"]),
            ),
            SourceDescriptor::new(
                "305477599",
                TimetableSource::new(
                    "North Manchester Jamia Mosque",
                    "https://www.northmanchesterjamiamasjid.com/",
                    ExtractionStrategy::StaticOnly,
                )
                .with_jummah(JUMMAH)
                .with_fallback(["05:20", "13:15", "16:45", "20:30", "22:00"]),
            ),
        ])
    }

    pub fn descriptors(&self) -> &[SourceDescriptor] {
        &self.descriptors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SourceDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn find_by_external_id(&self, external_id: &str) -> Option<&SourceDescriptor> {
        self.descriptors.iter().find(|d| d.external_id == external_id)
    }

    pub fn summaries(&self) -> Vec<DescriptorSummary> {
        self.descriptors
            .iter()
            .map(|d| DescriptorSummary {
                external_id: d.external_id.clone(),
                source: d.source.summary(),
            })
            .collect()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::manchester()
    }
}

impl<'a> IntoIterator for &'a SourceRegistry {
    type Item = &'a SourceDescriptor;
    type IntoIter = std::slice::Iter<'a, SourceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn manchester_sources_have_unique_ids_and_fallbacks() {
        let registry = SourceRegistry::manchester();
        assert_eq!(registry.len(), 4);

        let ids: HashSet<_> = registry.iter().map(|d| d.external_id.as_str()).collect();
        assert_eq!(ids.len(), registry.len());

        for descriptor in &registry {
            let fallback = descriptor.source.fallback_times().unwrap();
            assert!(fallback.is_complete(), "{} fallback incomplete", descriptor.name());
            assert_eq!(fallback.jummah.as_deref(), Some("13:30"));
        }
    }

    #[test]
    fn central_mosque_is_first_and_scraped() {
        let registry = SourceRegistry::manchester();
        let central = registry.find_by_external_id("2028166730").unwrap();
        assert_eq!(registry.descriptors()[0], *central);
        assert_eq!(central.source.strategy.kind(), "table-row-match");
    }

    #[test]
    fn summaries_flatten_source_fields() {
        let value = serde_json::to_value(SourceRegistry::manchester().summaries()).unwrap();
        assert_eq!(value[2]["external_id"], "305477499");
        assert_eq!(value[2]["name"], "Victoria Park Mosque");
        assert_eq!(value[2]["strategy"], "static-only");
    }
}
