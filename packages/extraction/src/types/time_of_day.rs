//! Time-of-day tokens as they appear on timetable pages.

use regex::Regex;
use std::sync::LazyLock;

/// Unanchored: finds `5:30`, `05.30`, `5:30 pm`, `5:30PM`, `5:30 a.m.` inside text.
static TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d{1,2}[:.]\d{2}(?:\s?[ap]\.?m\b\.?)?").expect("time token regex is valid")
});

/// Anchored: a cell or token that is nothing but a time.
static TIME_EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})[:.](\d{2})\s*(?:([ap])\.?\s?m\.?)?$")
        .expect("exact time regex is valid")
});

/// First time-like token in `text`.
pub fn find_time_token(text: &str) -> Option<&str> {
    TIME_TOKEN.find(text).map(|m| m.as_str())
}

/// Normalise a scraped time to 24h `HH:MM` when it parses; otherwise return it trimmed.
pub fn normalize_time(raw: &str) -> String {
    let trimmed = raw.trim();
    parse_clock(trimmed)
        .map(|(hour, minute)| format!("{:02}:{:02}", hour, minute))
        .unwrap_or_else(|| trimmed.to_string())
}

fn parse_clock(value: &str) -> Option<(u32, u32)> {
    let caps = TIME_EXACT.captures(value)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
    if minute > 59 {
        return None;
    }

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        None if hour <= 23 => Some((hour, minute)),
        None => None,
        Some(_) if hour == 0 || hour > 12 => None,
        Some(meridiem) if meridiem == "a" => Some((hour % 12, minute)),
        Some(_) => Some((hour % 12 + 12, minute)),
    }
}
