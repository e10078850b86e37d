use anyhow::{Context, Result};
use dotenvy::dotenv;
use prayer_extraction::{DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub scraper_user_agent: String,
    pub ingestion: IngestionConfig,
}

/// Knobs for a single ingestion run.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionConfig {
    /// Upper bound on each source page fetch.
    pub fetch_timeout: Duration,
    /// Coordinates given to newly provisioned mosques until they are geocoded.
    pub placeholder_latitude: f64,
    pub placeholder_longitude: f64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            // Manchester city centre
            placeholder_latitude: 53.4808,
            placeholder_longitude: -2.2426,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = IngestionConfig::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            scraper_user_agent: env::var("SCRAPER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            ingestion: IngestionConfig {
                fetch_timeout: match env::var("SOURCE_FETCH_TIMEOUT_SECS") {
                    Ok(raw) => Duration::from_secs(
                        raw.parse()
                            .context("SOURCE_FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
                    ),
                    Err(_) => defaults.fetch_timeout,
                },
                placeholder_latitude: match env::var("PLACEHOLDER_LATITUDE") {
                    Ok(raw) => raw
                        .parse()
                        .context("PLACEHOLDER_LATITUDE must be a decimal number")?,
                    Err(_) => defaults.placeholder_latitude,
                },
                placeholder_longitude: match env::var("PLACEHOLDER_LONGITUDE") {
                    Ok(raw) => raw
                        .parse()
                        .context("PLACEHOLDER_LONGITUDE must be a decimal number")?,
                    Err(_) => defaults.placeholder_longitude,
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingestion_defaults_point_at_manchester() {
        let config = IngestionConfig::default();
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert!((config.placeholder_latitude - 53.4808).abs() < f64::EPSILON);
        assert!((config.placeholder_longitude + 2.2426).abs() < f64::EPSILON);
    }
}
