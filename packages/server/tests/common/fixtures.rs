//! Shared fixtures: dates, timetable pages and registries.

use chrono::{Datelike, NaiveDate};
use prayer_extraction::{ExtractionStrategy, TableRowMatch, TimetableSource};
use server_core::domains::prayer_times::{SourceDescriptor, SourceRegistry};

pub const CENTRAL_URL: &str = "https://www.manchestercentralmosque.org/prayer-times/";
pub const DIDSBURY_URL: &str = "https://www.didsburymosque.com/prayer-times/";
pub const CENTRAL_OSM_ID: &str = "2028166730";
pub const DIDSBURY_OSM_ID: &str = "305477399";
pub const VICTORIA_PARK_OSM_ID: &str = "305477499";
pub const NORTH_MANCHESTER_OSM_ID: &str = "305477599";

/// A Saturday.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

/// Month timetable with one row per day up to `today`; today's row carries
/// `times`, the others a fixed filler.
pub fn month_timetable(today: NaiveDate, times: [&str; 5]) -> String {
    let mut rows = String::from(
        "<tr><th>Date</th><th>Fajr</th><th>Zuhr</th><th>Asr</th><th>Maghrib</th><th>Isha</th></tr>",
    );
    for day in 1..=today.day() {
        let cells = if day == today.day() {
            times
        } else {
            ["6:00", "12:00", "15:00", "18:00", "20:00"]
        };
        rows.push_str(&format!("<tr><td>{}</td>", day));
        for cell in cells {
            rows.push_str(&format!("<td>{}</td>", cell));
        }
        rows.push_str("</tr>");
    }
    format!("<html><body><table>{}</table></body></html>", rows)
}

/// Timetable carrying `times` on every day 1..=31, for runs that pick their
/// own date.
pub fn any_day_timetable(times: [&str; 5]) -> String {
    let mut rows = String::from(
        "<tr><th>Date</th><th>Fajr</th><th>Zuhr</th><th>Asr</th><th>Maghrib</th><th>Isha</th></tr>",
    );
    for day in 1..=31 {
        rows.push_str(&format!("<tr><td>{}</td>", day));
        for cell in times {
            rows.push_str(&format!("<td>{}</td>", cell));
        }
        rows.push_str("</tr>");
    }
    format!("<html><body><table>{}</table></body></html>", rows)
}

/// Static source with a complete fallback and jummah 13:30.
pub fn static_descriptor(external_id: &str, name: &str) -> SourceDescriptor {
    SourceDescriptor::new(
        external_id,
        TimetableSource::new(name, "https://mosque.test/", ExtractionStrategy::StaticOnly)
            .with_jummah("13:30")
            .with_fallback(["05:00", "13:00", "16:00", "19:00", "21:00"]),
    )
}

/// Table source with a complete fallback and jummah 13:30.
pub fn table_descriptor(external_id: &str, name: &str, url: &str) -> SourceDescriptor {
    SourceDescriptor::new(
        external_id,
        TimetableSource::new(name, url, ExtractionStrategy::table(TableRowMatch::default()))
            .with_jummah("13:30")
            .with_fallback(["05:00", "13:15", "16:30", "20:15", "21:45"]),
    )
}

/// Source with no procedure and no fallback.
pub fn unavailable_descriptor(external_id: &str, name: &str) -> SourceDescriptor {
    SourceDescriptor::new(
        external_id,
        TimetableSource::new(name, "https://mosque.test/", ExtractionStrategy::NotImplemented),
    )
}

/// The default registry plus extra descriptors.
pub fn manchester_with(extra: Vec<SourceDescriptor>) -> SourceRegistry {
    let mut descriptors = SourceRegistry::manchester().descriptors().to_vec();
    descriptors.extend(extra);
    SourceRegistry::new(descriptors)
}

/// Distinct suffix for ids and names in the shared database.
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
