//! Typed ID definitions for domain entities.

pub use super::id::Id;

/// Marker type for canonical mosque records.
pub struct Mosque;

/// Marker type for per-day prayer-time records.
pub struct PrayerTimeRecord;

pub type MosqueId = Id<Mosque>;

pub type PrayerTimeId = Id<PrayerTimeRecord>;
