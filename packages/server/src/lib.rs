// Masjid Finder - API Core
//
// This crate provides the backend for the mosque directory: the canonical
// mosque and prayer-time store, the prayer-time ingestion pipeline and the
// HTTP surface that triggers and serves it.
//
// Timetable scraping itself lives in the prayer-extraction crate.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
