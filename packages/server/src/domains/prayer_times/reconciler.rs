//! Matches registry sources to canonical mosques and stores today's times.

use chrono::NaiveDate;
use prayer_extraction::{ExtractionError, ExtractionMethod, ExtractionOutcome, Extractor};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::models::{PrayerTimeRecord, PrayerTimeUpsert};
use super::registry::{SourceDescriptor, SourceRegistry};
use crate::common::MosqueId;
use crate::domains::mosques::Mosque;
use crate::kernel::BaseCatalogStore;

/// Why one source produced nothing this run. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceFailure {
    #[error("No matching mosque in database")]
    NoMatchingMosque,

    #[error("Prayer times unavailable: {0}")]
    Unavailable(ExtractionError),

    #[error("Failed to store prayer times: {0}")]
    StoreWrite(String),
}

impl SourceFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceFailure::NoMatchingMosque => "no_matching_mosque",
            SourceFailure::Unavailable(_) => "unavailable",
            SourceFailure::StoreWrite(_) => "store_write",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reconciled {
    pub mosque_id: MosqueId,
    pub method: ExtractionMethod,
    pub record: PrayerTimeRecord,
}

/// One source's result within a run.
#[derive(Debug, Clone)]
pub struct SourceRun {
    pub source_name: String,
    pub outcome: Result<Reconciled, SourceFailure>,
}

/// External id first; otherwise the first mosque whose name contains the
/// source name, ignoring case.
pub fn match_mosque<'a>(descriptor: &SourceDescriptor, mosques: &'a [Mosque]) -> Option<&'a Mosque> {
    mosques
        .iter()
        .find(|m| m.osm_id.as_deref() == Some(descriptor.external_id.as_str()))
        .or_else(|| mosques.iter().find(|m| m.name_contains(descriptor.name())))
}

pub struct Reconciler {
    store: Arc<dyn BaseCatalogStore>,
    extractor: Extractor,
}

impl Reconciler {
    pub fn new(store: Arc<dyn BaseCatalogStore>, extractor: Extractor) -> Self {
        Self { store, extractor }
    }

    /// Process every descriptor in registry order, one at a time.
    pub async fn reconcile(
        &self,
        registry: &SourceRegistry,
        mosques: &[Mosque],
        today: NaiveDate,
    ) -> Vec<SourceRun> {
        let mut runs = Vec::with_capacity(registry.len());
        for descriptor in registry {
            let outcome = self.reconcile_one(descriptor, mosques, today).await;
            if let Err(failure) = &outcome {
                warn!(source = %descriptor.name(), kind = failure.kind(), error = %failure, "Source failed");
            }
            runs.push(SourceRun {
                source_name: descriptor.name().to_string(),
                outcome,
            });
        }
        runs
    }

    pub async fn reconcile_one(
        &self,
        descriptor: &SourceDescriptor,
        mosques: &[Mosque],
        today: NaiveDate,
    ) -> Result<Reconciled, SourceFailure> {
        let mosque = match_mosque(descriptor, mosques).ok_or(SourceFailure::NoMatchingMosque)?;
        debug!(source = %descriptor.name(), mosque_id = %mosque.id, mosque = %mosque.name, "Matched mosque");

        let (times, method) = match self.extractor.extract(&descriptor.source, today).await {
            ExtractionOutcome::Extracted { times, method } => (times, method),
            ExtractionOutcome::Fallback { times, cause } => {
                debug!(source = %descriptor.name(), cause = %cause, "Storing fallback times");
                (times, ExtractionMethod::Fallback)
            }
            ExtractionOutcome::Static { times } => (times, ExtractionMethod::Static),
            ExtractionOutcome::Unavailable { cause } => {
                return Err(SourceFailure::Unavailable(cause))
            }
        };

        let upsert = PrayerTimeUpsert::new(mosque.id, today, times).with_source_url(descriptor.url());
        let record = self
            .store
            .upsert_prayer_times(&upsert)
            .await
            .map_err(|e| SourceFailure::StoreWrite(format!("{:#}", e)))?;

        info!(source = %descriptor.name(), mosque_id = %mosque.id, %method, date = %today, "Stored prayer times");
        Ok(Reconciled {
            mosque_id: mosque.id,
            method,
            record,
        })
    }
}
