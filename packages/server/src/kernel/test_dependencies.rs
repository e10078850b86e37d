// TestDependencies - in-memory implementations for testing
//
// Provides a catalog store and page fetcher that can be injected into
// ServerDeps so the ingestion pipeline and HTTP routes run without Postgres
// or the network.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use prayer_extraction::MockFetcher;
use sqlx::types::Json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::{BaseCatalogStore, ServerDeps};
use crate::common::{MosqueId, PrayerTimeId};
use crate::config::IngestionConfig;
use crate::domains::mosques::models::{Mosque, NewMosque, ProvisionedRow, WeeklyHours};
use crate::domains::prayer_times::models::{PrayerTimeRecord, PrayerTimeUpsert};
use crate::domains::prayer_times::SourceRegistry;

// =============================================================================
// Memory Catalog Store
// =============================================================================

#[derive(Default)]
struct Failures {
    listing: bool,
    lookups: bool,
    lookup_ids: HashSet<String>,
    provisioning: HashSet<String>,
    upserts: HashSet<MosqueId>,
}

/// Catalog store backed by vectors, with the same conflict rules as Postgres:
/// one mosque per osm_id and one prayer-time row per (mosque, date).
#[derive(Default)]
pub struct MemoryCatalogStore {
    mosques: Arc<Mutex<Vec<Mosque>>>,
    prayer_times: Arc<Mutex<Vec<PrayerTimeRecord>>>,
    failures: Arc<Mutex<Failures>>,
    upsert_calls: Arc<Mutex<Vec<PrayerTimeUpsert>>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a mosque as if an admin or importer had created it
    pub fn seed_mosque(&self, name: &str, osm_id: Option<&str>) -> MosqueId {
        let mosque = Mosque {
            id: MosqueId::new(),
            name: name.to_string(),
            description: None,
            website_url: None,
            is_restricted: false,
            latitude: 53.4808,
            longitude: -2.2426,
            operating_hours: Json(WeeklyHours::default_schedule()),
            osm_id: osm_id.map(str::to_string),
            source: "osm".to_string(),
            kind: "mosque".to_string(),
            created_at: Utc::now(),
        };
        let id = mosque.id;
        self.mosques.lock().unwrap().push(mosque);
        id
    }

    /// Make `list_mosques` fail
    pub fn fail_listing(&self) {
        self.failures.lock().unwrap().listing = true;
    }

    /// Make osm_id lookups fail
    pub fn fail_lookups(&self) {
        self.failures.lock().unwrap().lookups = true;
    }

    /// Make the lookup of this osm_id fail
    pub fn fail_lookup_for(&self, osm_id: &str) {
        self.failures
            .lock()
            .unwrap()
            .lookup_ids
            .insert(osm_id.to_string());
    }

    /// Make provisioning of this osm_id fail
    pub fn fail_provisioning_for(&self, osm_id: &str) {
        self.failures
            .lock()
            .unwrap()
            .provisioning
            .insert(osm_id.to_string());
    }

    /// Make prayer-time writes for this mosque fail
    pub fn fail_upserts_for(&self, mosque_id: MosqueId) {
        self.failures.lock().unwrap().upserts.insert(mosque_id);
    }

    pub fn mosques(&self) -> Vec<Mosque> {
        self.mosques.lock().unwrap().clone()
    }

    pub fn mosques_with_osm_id(&self, osm_id: &str) -> Vec<Mosque> {
        self.mosques
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.osm_id.as_deref() == Some(osm_id))
            .cloned()
            .collect()
    }

    pub fn prayer_times(&self) -> Vec<PrayerTimeRecord> {
        self.prayer_times.lock().unwrap().clone()
    }

    /// Get every upsert that was attempted, including failed ones
    pub fn upsert_calls(&self) -> Vec<PrayerTimeUpsert> {
        self.upsert_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseCatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_mosques(&self) -> Result<Vec<Mosque>> {
        if self.failures.lock().unwrap().listing {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.mosques())
    }

    async fn find_mosque(&self, id: MosqueId) -> Result<Option<Mosque>> {
        Ok(self
            .mosques
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn find_mosque_by_osm_id(&self, osm_id: &str) -> Result<Option<Mosque>> {
        {
            let failures = self.failures.lock().unwrap();
            if failures.lookups {
                return Err(anyhow!("connection refused"));
            }
            if failures.lookup_ids.contains(osm_id) {
                return Err(anyhow!("statement timeout"));
            }
        }
        Ok(self.mosques_with_osm_id(osm_id).into_iter().next())
    }

    async fn provision_mosque(&self, new: &NewMosque) -> Result<ProvisionedRow> {
        if self.failures.lock().unwrap().provisioning.contains(&new.osm_id) {
            return Err(anyhow!(
                "new row for relation \"mosques\" violates check constraint"
            ));
        }

        let mut mosques = self.mosques.lock().unwrap();
        if let Some(existing) = mosques
            .iter()
            .find(|m| m.osm_id.as_deref() == Some(new.osm_id.as_str()))
        {
            return Ok(ProvisionedRow {
                mosque: existing.clone(),
                inserted: false,
            });
        }

        let mosque = Mosque {
            id: MosqueId::new(),
            name: new.name.clone(),
            description: new.description.clone(),
            website_url: new.website_url.clone(),
            is_restricted: false,
            latitude: new.latitude,
            longitude: new.longitude,
            operating_hours: Json(new.operating_hours.clone()),
            osm_id: Some(new.osm_id.clone()),
            source: new.source.to_string(),
            kind: new.kind.to_string(),
            created_at: Utc::now(),
        };
        mosques.push(mosque.clone());
        Ok(ProvisionedRow {
            mosque,
            inserted: true,
        })
    }

    async fn upsert_prayer_times(&self, input: &PrayerTimeUpsert) -> Result<PrayerTimeRecord> {
        self.upsert_calls.lock().unwrap().push(input.clone());

        if self.failures.lock().unwrap().upserts.contains(&input.mosque_id) {
            return Err(anyhow!(
                "insert or update on table \"prayer_times\" violates foreign key constraint"
            ));
        }

        let now = Utc::now();
        let times = &input.times;
        let mut rows = self.prayer_times.lock().unwrap();

        if let Some(row) = rows
            .iter_mut()
            .find(|r| r.mosque_id == input.mosque_id && r.date == input.date)
        {
            row.fajr = times.fajr.clone();
            row.dhuhr = times.dhuhr.clone();
            row.asr = times.asr.clone();
            row.maghrib = times.maghrib.clone();
            row.isha = times.isha.clone();
            row.jummah = times.jummah.clone();
            row.source_url = input.source_url.clone();
            row.updated_at = now;
            return Ok(row.clone());
        }

        let row = PrayerTimeRecord {
            id: PrayerTimeId::new(),
            mosque_id: input.mosque_id,
            date: input.date,
            fajr: times.fajr.clone(),
            dhuhr: times.dhuhr.clone(),
            asr: times.asr.clone(),
            maghrib: times.maghrib.clone(),
            isha: times.isha.clone(),
            jummah: times.jummah.clone(),
            source_url: input.source_url.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_prayer_times(
        &self,
        mosque_id: MosqueId,
        date: NaiveDate,
    ) -> Result<Option<PrayerTimeRecord>> {
        Ok(self
            .prayer_times
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.mosque_id == mosque_id && r.date == date)
            .cloned())
    }

    async fn list_prayer_times(&self, mosque_id: MosqueId) -> Result<Vec<PrayerTimeRecord>> {
        let mut rows: Vec<_> = self
            .prayer_times
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.mosque_id == mosque_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}

// =============================================================================
// Test Dependencies
// =============================================================================

/// Bundle of test doubles; keeps handles so tests can inspect them after
/// the pipeline has consumed the `ServerDeps`.
pub struct TestDependencies {
    pub store: Arc<MemoryCatalogStore>,
    pub fetcher: MockFetcher,
    pub registry: SourceRegistry,
    pub ingestion: IngestionConfig,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryCatalogStore::new()),
            fetcher: MockFetcher::new(),
            registry: SourceRegistry::default(),
            ingestion: IngestionConfig::default(),
        }
    }

    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_fetcher(mut self, fetcher: MockFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_ingestion_config(mut self, ingestion: IngestionConfig) -> Self {
        self.ingestion = ingestion;
        self
    }

    /// Build ServerDeps sharing these doubles
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.store.clone(),
            Arc::new(self.fetcher.clone()),
            Arc::new(self.registry.clone()),
            self.ingestion.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
