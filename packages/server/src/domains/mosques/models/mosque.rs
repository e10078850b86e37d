use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use super::operating_hours::WeeklyHours;
use crate::common::MosqueId;

/// Mosque - canonical place record shown on the map
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mosque {
    pub id: MosqueId,
    pub name: String,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub is_restricted: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub operating_hours: Json<WeeklyHours>,
    /// External source id (OSM node, places-API id). Unique when present.
    pub osm_id: Option<String>,
    pub source: String, // 'manual', 'osm', 'google'
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String, // 'mosque', 'musalla'
    pub created_at: DateTime<Utc>,
}

/// Where a mosque record came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MosqueSource {
    Manual,
    Osm,
    Google,
}

impl std::fmt::Display for MosqueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MosqueSource::Manual => write!(f, "manual"),
            MosqueSource::Osm => write!(f, "osm"),
            MosqueSource::Google => write!(f, "google"),
        }
    }
}

impl std::str::FromStr for MosqueSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual" => Ok(MosqueSource::Manual),
            "osm" => Ok(MosqueSource::Osm),
            "google" => Ok(MosqueSource::Google),
            _ => Err(anyhow::anyhow!("Invalid mosque source: {}", s)),
        }
    }
}

/// Mosque category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MosqueKind {
    Mosque,
    Musalla,
}

impl std::fmt::Display for MosqueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MosqueKind::Mosque => write!(f, "mosque"),
            MosqueKind::Musalla => write!(f, "musalla"),
        }
    }
}

impl std::str::FromStr for MosqueKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mosque" => Ok(MosqueKind::Mosque),
            "musalla" => Ok(MosqueKind::Musalla),
            _ => Err(anyhow::anyhow!("Invalid mosque type: {}", s)),
        }
    }
}

/// Fields for a mosque keyed by an external source id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMosque {
    pub name: String,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub operating_hours: WeeklyHours,
    pub osm_id: String,
    pub source: MosqueSource,
    pub kind: MosqueKind,
}

/// Result of [`Mosque::provision`]: the row plus whether this call created it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProvisionedRow {
    #[sqlx(flatten)]
    pub mosque: Mosque,
    pub inserted: bool,
}

impl Mosque {
    pub fn source(&self) -> Result<MosqueSource> {
        self.source.parse()
    }

    pub fn kind(&self) -> Result<MosqueKind> {
        self.kind.parse()
    }

    /// Case-insensitive containment of `needle` in the display name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Mosque {
    /// All mosques, oldest first (the order name matching walks them in)
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let mosques =
            sqlx::query_as::<_, Mosque>("SELECT * FROM mosques ORDER BY created_at, id")
                .fetch_all(pool)
                .await?;
        Ok(mosques)
    }

    pub async fn find_by_id(id: MosqueId, pool: &PgPool) -> Result<Option<Self>> {
        let mosque = sqlx::query_as::<_, Mosque>("SELECT * FROM mosques WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(mosque)
    }

    pub async fn find_by_osm_id(osm_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let mosque = sqlx::query_as::<_, Mosque>("SELECT * FROM mosques WHERE osm_id = $1")
            .bind(osm_id)
            .fetch_optional(pool)
            .await?;
        Ok(mosque)
    }

    /// Insert a mosque unless one with the same `osm_id` already exists.
    ///
    /// Uses INSERT ... ON CONFLICT so concurrent provisioning runs converge on
    /// a single row. The conflict branch is a no-op update so RETURNING yields
    /// the existing row; `xmax = 0` only holds for freshly inserted tuples.
    pub async fn provision(new: &NewMosque, pool: &PgPool) -> Result<ProvisionedRow> {
        let row = sqlx::query_as::<_, ProvisionedRow>(
            r#"
            INSERT INTO mosques (
                id, name, description, website_url, latitude, longitude,
                operating_hours, osm_id, source, type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (osm_id) DO UPDATE SET osm_id = EXCLUDED.osm_id
            RETURNING *, (xmax = 0) AS inserted
            "#,
        )
        .bind(MosqueId::new())
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.website_url)
        .bind(new.latitude)
        .bind(new.longitude)
        .bind(Json(&new.operating_hours))
        .bind(&new.osm_id)
        .bind(new.source.to_string())
        .bind(new.kind.to_string())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_and_kind_roundtrip_through_strings() {
        for source in [MosqueSource::Manual, MosqueSource::Osm, MosqueSource::Google] {
            assert_eq!(source.to_string().parse::<MosqueSource>().unwrap(), source);
        }
        assert_eq!("musalla".parse::<MosqueKind>().unwrap(), MosqueKind::Musalla);
        assert!("church".parse::<MosqueKind>().is_err());
    }

    #[test]
    fn serializes_kind_as_type() {
        let mosque = Mosque {
            id: MosqueId::new(),
            name: "Didsbury Mosque Manchester".to_string(),
            description: None,
            website_url: None,
            is_restricted: false,
            latitude: 53.4,
            longitude: -2.2,
            operating_hours: Json(WeeklyHours::default_schedule()),
            osm_id: None,
            source: "manual".to_string(),
            kind: "mosque".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&mosque).unwrap();
        assert_eq!(value["type"], "mosque");
        assert_eq!(value["operating_hours"][0]["openTime"], "05:00");
        assert!(mosque.name_contains("didsbury mosque"));
    }
}
