use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Day names in storage order.
pub const WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Opening window for a single weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub day: String,
    pub open_time: String,
    pub close_time: String,
}

impl DayHours {
    pub fn new(day: &str, open_time: &str, close_time: &str) -> Self {
        Self {
            day: day.to_string(),
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
        }
    }

    fn contains(&self, time: NaiveTime) -> bool {
        match (parse_clock(&self.open_time), parse_clock(&self.close_time)) {
            (Some(open), Some(close)) => open <= time && time <= close,
            _ => false,
        }
    }
}

/// Weekly schedule stored in `mosques.operating_hours`.
///
/// Always serialized as an array of `{day, openTime, closeTime}` objects.
/// Rows written before the array shape was settled hold a day-keyed map
/// (`{"Monday": {"openTime": .., "closeTime": ..}}`); those are accepted on
/// read and come back out as the array, Monday first. Either shape may also
/// arrive JSON-encoded inside a string. Anything else decodes as an empty
/// schedule so one odd row never fails a catalog read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklyHours(pub Vec<DayHours>);

impl WeeklyHours {
    /// Same window on every day of the week.
    pub fn every_day(open_time: &str, close_time: &str) -> Self {
        Self(
            WEEK.iter()
                .map(|day| DayHours::new(day, open_time, close_time))
                .collect(),
        )
    }

    /// Schedule given to mosques created by provisioning.
    pub fn default_schedule() -> Self {
        Self::every_day("05:00", "22:00")
    }

    pub fn days(&self) -> &[DayHours] {
        &self.0
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DayHours> {
        let name = WEEK[weekday.num_days_from_monday() as usize];
        self.0.iter().find(|d| d.day.eq_ignore_ascii_case(name))
    }

    /// True when `at` falls inside that weekday's window, both ends inclusive.
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        self.for_weekday(at.weekday())
            .map(|hours| hours.contains(at.time()))
            .unwrap_or(false)
    }
}

fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyWindow {
    open_time: String,
    close_time: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredHours {
    Days(Vec<DayHours>),
    ByDay(HashMap<String, LegacyWindow>),
    Encoded(String),
    Other(serde_json::Value),
}

impl StoredHours {
    fn into_hours(self) -> WeeklyHours {
        match self {
            StoredHours::Days(days) => WeeklyHours(days),
            StoredHours::ByDay(mut map) => {
                let mut days = Vec::with_capacity(map.len());
                for name in WEEK {
                    let key = map.keys().find(|k| k.eq_ignore_ascii_case(name)).cloned();
                    if let Some(window) = key.and_then(|k| map.remove(&k)) {
                        days.push(DayHours {
                            day: name.to_string(),
                            open_time: window.open_time,
                            close_time: window.close_time,
                        });
                    }
                }
                WeeklyHours(days)
            }
            StoredHours::Encoded(raw) => match serde_json::from_str::<StoredHours>(&raw) {
                // A string inside the string is not unwrapped again
                Ok(StoredHours::Encoded(_)) | Ok(StoredHours::Other(_)) | Err(_) => {
                    warn!(raw = %raw, "Unrecognised operating hours; treating as empty");
                    WeeklyHours::default()
                }
                Ok(decoded) => decoded.into_hours(),
            },
            StoredHours::Other(value) => {
                warn!(value = %value, "Unrecognised operating hours; treating as empty");
                WeeklyHours::default()
            }
        }
    }
}

impl<'de> Deserialize<'de> for WeeklyHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(StoredHours::deserialize(deserializer)?.into_hours())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(date: (i32, u32, u32), hm: (u32, u32)) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(hm.0, hm.1, 0)
            .unwrap()
    }

    #[test]
    fn default_schedule_covers_the_week() {
        let hours = WeeklyHours::default_schedule();
        assert_eq!(hours.days().len(), 7);
        assert_eq!(hours.days()[0].day, "Monday");
        assert!(hours.days().iter().all(|d| d.open_time == "05:00" && d.close_time == "22:00"));
    }

    #[test]
    fn serializes_as_camel_case_array() {
        let value = serde_json::to_value(WeeklyHours::every_day("06:00", "21:00")).unwrap();
        assert_eq!(
            value[0],
            json!({"day": "Monday", "openTime": "06:00", "closeTime": "21:00"})
        );
    }

    #[test]
    fn legacy_day_map_is_normalized_monday_first() {
        let legacy = json!({
            "sunday": {"openTime": "07:00", "closeTime": "20:00"},
            "Monday": {"openTime": "05:00", "closeTime": "22:00"},
        });
        let hours: WeeklyHours = serde_json::from_value(legacy).unwrap();
        assert_eq!(
            hours,
            WeeklyHours(vec![
                DayHours::new("Monday", "05:00", "22:00"),
                DayHours::new("Sunday", "07:00", "20:00"),
            ])
        );
    }

    #[test]
    fn string_encoded_array_is_decoded() {
        let stored = json!(
            "[{\"day\":\"Monday\",\"openTime\":\"05:00\",\"closeTime\":\"22:00\"}]"
        );
        let hours: WeeklyHours = serde_json::from_value(stored).unwrap();
        assert_eq!(hours, WeeklyHours(vec![DayHours::new("Monday", "05:00", "22:00")]));
    }

    #[test]
    fn string_encoded_day_map_is_normalized() {
        let stored = json!(r#"{"Friday":{"openTime":"12:00","closeTime":"14:00"}}"#);
        let hours: WeeklyHours = serde_json::from_value(stored).unwrap();
        assert_eq!(hours, WeeklyHours(vec![DayHours::new("Friday", "12:00", "14:00")]));
    }

    #[test]
    fn unrecognised_shapes_read_as_empty() {
        for stored in [
            json!(null),
            json!(42),
            json!("open all day"),
            json!([{"day": "Monday"}]),
            json!("\"[]\""),
        ] {
            let hours: WeeklyHours = serde_json::from_value(stored).unwrap();
            assert!(hours.days().is_empty());
        }
    }

    #[test]
    fn open_window_is_inclusive() {
        let hours = WeeklyHours::default_schedule();
        // 2026-10-19 is a Monday
        assert!(hours.is_open_at(at((2026, 10, 19), (5, 0))));
        assert!(hours.is_open_at(at((2026, 10, 19), (22, 0))));
        assert!(!hours.is_open_at(at((2026, 10, 19), (22, 1))));
        assert!(!hours.is_open_at(at((2026, 10, 19), (4, 59))));
    }

    #[test]
    fn missing_day_is_closed() {
        let hours = WeeklyHours(vec![DayHours::new("Friday", "12:00", "14:00")]);
        // 2026-10-23 is a Friday, 2026-10-24 a Saturday
        assert!(hours.is_open_at(at((2026, 10, 23), (13, 0))));
        assert!(!hours.is_open_at(at((2026, 10, 24), (13, 0))));
    }
}
