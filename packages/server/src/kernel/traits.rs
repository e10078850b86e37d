// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Matching, provisioning decisions and report building live in the domains
// and only reach storage through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseCatalogStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::common::MosqueId;
use crate::domains::mosques::models::{Mosque, NewMosque, ProvisionedRow};
use crate::domains::prayer_times::models::{PrayerTimeRecord, PrayerTimeUpsert};

// =============================================================================
// Catalog Store Trait (Infrastructure - canonical mosque + prayer-time store)
// =============================================================================

#[async_trait]
pub trait BaseCatalogStore: Send + Sync {
    /// Cheap round trip used by health checks
    async fn ping(&self) -> Result<()>;

    /// All canonical mosques, in a stable order
    async fn list_mosques(&self) -> Result<Vec<Mosque>>;

    async fn find_mosque(&self, id: MosqueId) -> Result<Option<Mosque>>;

    async fn find_mosque_by_osm_id(&self, osm_id: &str) -> Result<Option<Mosque>>;

    /// Insert unless a mosque with the same osm_id exists; atomic at the store.
    async fn provision_mosque(&self, new: &NewMosque) -> Result<ProvisionedRow>;

    /// Atomic last-write-wins upsert keyed by (mosque_id, date).
    async fn upsert_prayer_times(&self, input: &PrayerTimeUpsert) -> Result<PrayerTimeRecord>;

    async fn find_prayer_times(
        &self,
        mosque_id: MosqueId,
        date: NaiveDate,
    ) -> Result<Option<PrayerTimeRecord>>;

    /// Every stored day for one mosque, newest first
    async fn list_prayer_times(&self, mosque_id: MosqueId) -> Result<Vec<PrayerTimeRecord>>;
}
