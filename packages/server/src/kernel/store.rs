//! Postgres-backed catalog store.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::common::MosqueId;
use crate::domains::mosques::models::{Mosque, NewMosque, ProvisionedRow};
use crate::domains::prayer_times::models::{PrayerTimeRecord, PrayerTimeUpsert};
use crate::kernel::BaseCatalogStore;

/// Thin adapter from [`BaseCatalogStore`] onto the model query methods.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseCatalogStore for PostgresCatalogStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_mosques(&self) -> Result<Vec<Mosque>> {
        Mosque::find_all(&self.pool).await
    }

    async fn find_mosque(&self, id: MosqueId) -> Result<Option<Mosque>> {
        Mosque::find_by_id(id, &self.pool).await
    }

    async fn find_mosque_by_osm_id(&self, osm_id: &str) -> Result<Option<Mosque>> {
        Mosque::find_by_osm_id(osm_id, &self.pool).await
    }

    async fn provision_mosque(&self, new: &NewMosque) -> Result<ProvisionedRow> {
        Mosque::provision(new, &self.pool).await
    }

    async fn upsert_prayer_times(&self, input: &PrayerTimeUpsert) -> Result<PrayerTimeRecord> {
        PrayerTimeRecord::upsert(input, &self.pool).await
    }

    async fn find_prayer_times(
        &self,
        mosque_id: MosqueId,
        date: NaiveDate,
    ) -> Result<Option<PrayerTimeRecord>> {
        PrayerTimeRecord::find_for_mosque_on(mosque_id, date, &self.pool).await
    }

    async fn list_prayer_times(&self, mosque_id: MosqueId) -> Result<Vec<PrayerTimeRecord>> {
        PrayerTimeRecord::find_for_mosque(mosque_id, &self.pool).await
    }
}
