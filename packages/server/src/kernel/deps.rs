//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by the
//! ingestion pipeline and the HTTP routes. Storage and page fetching sit
//! behind traits so tests can swap in the in-memory doubles.

use anyhow::{Context, Result};
use prayer_extraction::{Extractor, HttpFetcher, PageFetcher};
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::{Config, IngestionConfig};
use crate::domains::prayer_times::{IngestionOrchestrator, SourceRegistry};
use crate::kernel::{BaseCatalogStore, PostgresCatalogStore};

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies shared by every request (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseCatalogStore>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub registry: Arc<SourceRegistry>,
    pub ingestion: IngestionConfig,
    /// Raw pool for connection-pool stats (None for in-memory tests)
    pub db_pool: Option<PgPool>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        store: Arc<dyn BaseCatalogStore>,
        fetcher: Arc<dyn PageFetcher>,
        registry: Arc<SourceRegistry>,
        ingestion: IngestionConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            registry,
            ingestion,
            db_pool: None,
        }
    }

    /// Production wiring: Postgres store, HTTP fetcher, default registry
    pub fn from_config(config: &Config, pool: PgPool) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.scraper_user_agent)
            .context("Failed to build HTTP client for source fetches")?;

        Ok(Self::new(
            Arc::new(PostgresCatalogStore::new(pool.clone())),
            Arc::new(fetcher),
            Arc::new(SourceRegistry::default()),
            config.ingestion.clone(),
        )
        .with_db_pool(pool))
    }

    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.fetcher.clone()).with_timeout(self.ingestion.fetch_timeout)
    }

    /// Orchestrator wired to these dependencies
    pub fn orchestrator(&self) -> IngestionOrchestrator {
        IngestionOrchestrator::new(
            self.store.clone(),
            self.extractor(),
            self.registry.clone(),
            self.ingestion.clone(),
        )
    }
}
