//! "Run ingestion now": provision, load, reconcile, report.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use prayer_extraction::{ExtractionMethod, Extractor};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::reconciler::{Reconciler, SourceRun};
use super::registry::SourceRegistry;
use crate::config::IngestionConfig;
use crate::domains::mosques::{MosqueProvisioner, ProvisionStatus, ProvisionedMosque};
use crate::kernel::BaseCatalogStore;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceResult {
    pub mosque: String,
    pub success: bool,
    pub method: ExtractionMethod,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceError {
    pub mosque: String,
    pub error: String,
    pub kind: &'static str,
}

/// Aggregate outcome of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    /// True when at least one source stored a record
    pub success: bool,
    pub message: String,
    pub results: Vec<SourceResult>,
    pub errors: Vec<SourceError>,
    #[serde(skip)]
    pub provisioned: Vec<ProvisionedMosque>,
}

impl IngestionReport {
    pub fn from_runs(provisioned: Vec<ProvisionedMosque>, runs: Vec<SourceRun>) -> Self {
        let mut results = Vec::new();
        let mut errors = Vec::new();

        for run in runs {
            match run.outcome {
                Ok(reconciled) => results.push(SourceResult {
                    mosque: run.source_name,
                    success: true,
                    method: reconciled.method,
                }),
                Err(failure) => errors.push(SourceError {
                    mosque: run.source_name,
                    error: failure.to_string(),
                    kind: failure.kind(),
                }),
            }
        }

        Self {
            success: !results.is_empty(),
            message: format!(
                "Successfully processed {} mosques with {} errors",
                results.len(),
                errors.len()
            ),
            results,
            errors,
            provisioned,
        }
    }

    pub fn created_count(&self) -> usize {
        self.provisioned
            .iter()
            .filter(|p| p.status == ProvisionStatus::Created)
            .count()
    }
}

pub struct IngestionOrchestrator {
    store: Arc<dyn BaseCatalogStore>,
    registry: Arc<SourceRegistry>,
    provisioner: MosqueProvisioner,
    reconciler: Reconciler,
}

impl IngestionOrchestrator {
    pub fn new(
        store: Arc<dyn BaseCatalogStore>,
        extractor: Extractor,
        registry: Arc<SourceRegistry>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            provisioner: MosqueProvisioner::new(store.clone(), config),
            reconciler: Reconciler::new(store.clone(), extractor),
            store,
            registry,
        }
    }

    pub async fn run(&self) -> Result<IngestionReport> {
        self.run_for(Utc::now().date_naive()).await
    }

    /// Run against an explicit "today".
    ///
    /// Errors only when the store itself is unusable; per-source problems
    /// land in the report.
    pub async fn run_for(&self, today: NaiveDate) -> Result<IngestionReport> {
        info!(sources = self.registry.len(), date = %today, "Starting prayer time ingestion");

        let provisioned = self.provisioner.provision(&self.registry).await?;

        let mosques = self
            .store
            .list_mosques()
            .await
            .context("Failed to load mosques")?;
        info!(count = mosques.len(), "Loaded canonical mosques");

        if mosques.is_empty() {
            bail!("No mosques found in database");
        }

        let runs = self
            .reconciler
            .reconcile(&self.registry, &mosques, today)
            .await;
        let report = IngestionReport::from_runs(provisioned, runs);

        info!(
            succeeded = report.results.len(),
            failed = report.errors.len(),
            created = report.created_count(),
            "Prayer time ingestion finished"
        );
        Ok(report)
    }
}
