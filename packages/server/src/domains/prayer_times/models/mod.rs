pub mod prayer_time;

pub use prayer_time::{PrayerTimeRecord, PrayerTimeUpsert};
