use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use prayer_extraction::DailyTimes;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MosqueId, PrayerTimeId};

/// PrayerTimeRecord - one day's timetable for one mosque
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrayerTimeRecord {
    pub id: PrayerTimeId,
    pub mosque_id: MosqueId,
    pub date: NaiveDate,
    pub fajr: Option<String>,
    pub dhuhr: Option<String>,
    pub asr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
    pub jummah: Option<String>,
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values written for a (mosque, date) key.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerTimeUpsert {
    pub mosque_id: MosqueId,
    pub date: NaiveDate,
    pub times: DailyTimes,
    pub source_url: Option<String>,
}

impl PrayerTimeUpsert {
    pub fn new(mosque_id: MosqueId, date: NaiveDate, times: DailyTimes) -> Self {
        Self {
            mosque_id,
            date,
            times,
            source_url: None,
        }
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}

impl PrayerTimeRecord {
    /// The stored values as extraction-shaped times.
    pub fn times(&self) -> DailyTimes {
        DailyTimes {
            fajr: self.fajr.clone(),
            dhuhr: self.dhuhr.clone(),
            asr: self.asr.clone(),
            maghrib: self.maghrib.clone(),
            isha: self.isha.clone(),
            jummah: self.jummah.clone(),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl PrayerTimeRecord {
    /// Write all six time fields and the source url for (mosque, date).
    ///
    /// Single statement, last write wins. Overlapping runs cannot lose an
    /// update or create a second row for the same key.
    pub async fn upsert(input: &PrayerTimeUpsert, pool: &PgPool) -> Result<Self> {
        let times = &input.times;
        let record = sqlx::query_as::<_, PrayerTimeRecord>(
            r#"
            INSERT INTO prayer_times (
                id, mosque_id, date, fajr, dhuhr, asr, maghrib, isha, jummah, source_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (mosque_id, date) DO UPDATE SET
                fajr = EXCLUDED.fajr,
                dhuhr = EXCLUDED.dhuhr,
                asr = EXCLUDED.asr,
                maghrib = EXCLUDED.maghrib,
                isha = EXCLUDED.isha,
                jummah = EXCLUDED.jummah,
                source_url = EXCLUDED.source_url,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(PrayerTimeId::new())
        .bind(input.mosque_id)
        .bind(input.date)
        .bind(&times.fajr)
        .bind(&times.dhuhr)
        .bind(&times.asr)
        .bind(&times.maghrib)
        .bind(&times.isha)
        .bind(&times.jummah)
        .bind(&input.source_url)
        .fetch_one(pool)
        .await?;
        Ok(record)
    }

    pub async fn find_for_mosque_on(
        mosque_id: MosqueId,
        date: NaiveDate,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let record = sqlx::query_as::<_, PrayerTimeRecord>(
            "SELECT * FROM prayer_times WHERE mosque_id = $1 AND date = $2",
        )
        .bind(mosque_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;
        Ok(record)
    }

    /// Rows stored for a mosque, newest date first
    pub async fn find_for_mosque(mosque_id: MosqueId, pool: &PgPool) -> Result<Vec<Self>> {
        let records = sqlx::query_as::<_, PrayerTimeRecord>(
            "SELECT * FROM prayer_times WHERE mosque_id = $1 ORDER BY date DESC",
        )
        .bind(mosque_id)
        .fetch_all(pool)
        .await?;
        Ok(records)
    }
}
