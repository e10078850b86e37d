//! Prayer times domain - source registry, reconciliation and ingestion runs

pub mod ingestion;
pub mod models;
pub mod reconciler;
pub mod registry;

pub use ingestion::{IngestionOrchestrator, IngestionReport, SourceError, SourceResult};
pub use models::{PrayerTimeRecord, PrayerTimeUpsert};
pub use reconciler::{match_mosque, Reconciled, Reconciler, SourceFailure, SourceRun};
pub use registry::{DescriptorSummary, SourceDescriptor, SourceRegistry};
