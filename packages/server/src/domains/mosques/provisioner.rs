//! Makes sure every registry source has a canonical mosque row before
//! prayer times are written against it.

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::models::{MosqueKind, MosqueSource, NewMosque, WeeklyHours};
use crate::common::MosqueId;
use crate::config::IngestionConfig;
use crate::domains::prayer_times::{SourceDescriptor, SourceRegistry};
use crate::kernel::BaseCatalogStore;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStatus {
    Created,
    Existing,
}

impl std::fmt::Display for ProvisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvisionStatus::Created => write!(f, "created"),
            ProvisionStatus::Existing => write!(f, "existing"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProvisionedMosque {
    pub external_id: String,
    pub name: String,
    pub status: ProvisionStatus,
    pub mosque_id: MosqueId,
}

pub struct MosqueProvisioner {
    store: Arc<dyn BaseCatalogStore>,
    config: IngestionConfig,
}

impl MosqueProvisioner {
    pub fn new(store: Arc<dyn BaseCatalogStore>, config: IngestionConfig) -> Self {
        Self { store, config }
    }

    /// Placeholder record for a source that has no mosque yet
    pub fn placeholder_for(&self, descriptor: &SourceDescriptor) -> NewMosque {
        NewMosque {
            name: descriptor.name().to_string(),
            description: Some(format!(
                "{} - Prayer times scraped from {}",
                descriptor.name(),
                descriptor.url()
            )),
            website_url: Some(descriptor.url().to_string()),
            latitude: self.config.placeholder_latitude,
            longitude: self.config.placeholder_longitude,
            operating_hours: WeeklyHours::default_schedule(),
            osm_id: descriptor.external_id.clone(),
            source: MosqueSource::Manual,
            kind: MosqueKind::Mosque,
        }
    }

    /// Ensure one mosque exists per descriptor.
    ///
    /// A failed lookup or insert only skips that descriptor, which then fails
    /// at matching. An unusable store surfaces when the catalog is listed.
    pub async fn provision(&self, registry: &SourceRegistry) -> Result<Vec<ProvisionedMosque>> {
        let mut provisioned = Vec::with_capacity(registry.len());

        for descriptor in registry {
            let existing = match self.store.find_mosque_by_osm_id(&descriptor.external_id).await {
                Ok(existing) => existing,
                Err(e) => {
                    warn!(
                        source = %descriptor.name(),
                        osm_id = %descriptor.external_id,
                        error = %e,
                        "Failed to look up mosque"
                    );
                    continue;
                }
            };

            if let Some(mosque) = existing {
                debug!(source = %descriptor.name(), mosque_id = %mosque.id, "Mosque already provisioned");
                provisioned.push(ProvisionedMosque {
                    external_id: descriptor.external_id.clone(),
                    name: descriptor.name().to_string(),
                    status: ProvisionStatus::Existing,
                    mosque_id: mosque.id,
                });
                continue;
            }

            match self.store.provision_mosque(&self.placeholder_for(descriptor)).await {
                Ok(row) => {
                    // A concurrent run may have inserted between lookup and insert
                    let status = if row.inserted {
                        info!(source = %descriptor.name(), mosque_id = %row.mosque.id, "Provisioned mosque");
                        ProvisionStatus::Created
                    } else {
                        ProvisionStatus::Existing
                    };
                    provisioned.push(ProvisionedMosque {
                        external_id: descriptor.external_id.clone(),
                        name: descriptor.name().to_string(),
                        status,
                        mosque_id: row.mosque.id,
                    });
                }
                Err(e) => {
                    warn!(source = %descriptor.name(), error = %e, "Failed to provision mosque");
                }
            }
        }

        Ok(provisioned)
    }
}
