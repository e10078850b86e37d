//! Mosques domain - canonical place records and placeholder provisioning

pub mod models;
pub mod provisioner;

pub use models::{DayHours, Mosque, MosqueKind, MosqueSource, NewMosque, WeeklyHours};
pub use provisioner::{MosqueProvisioner, ProvisionStatus, ProvisionedMosque};
