//! Timetable-row matching.
//!
//! Most mosque sites publish a monthly table with one row per day. We take
//! the first row whose leading cell mentions today (day-of-month, ISO date or,
//! optionally, the weekday name) and read the prayer columns positionally.
//! `contains` matching is deliberately loose: "1" also matches "21".

use chrono::{Datelike, NaiveDate};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::strategy::parse_selector;
use crate::types::{normalize_time, DailyTimes, Prayer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRowMatch {
    /// CSS selector(s) for elements containing timetable rows
    pub container_selector: String,
    /// CSS selector for rows inside a container
    pub row_selector: String,
    /// 0-based cell index for fajr, dhuhr, asr, maghrib, isha
    pub columns: [usize; 5],
    /// Also accept rows whose leading cell names today's weekday
    pub match_weekday: bool,
}

impl Default for TableRowMatch {
    fn default() -> Self {
        Self {
            container_selector: "table".to_string(),
            row_selector: "tr".to_string(),
            columns: [1, 2, 3, 4, 5],
            match_weekday: false,
        }
    }
}

impl TableRowMatch {
    pub fn new(container_selector: impl Into<String>) -> Self {
        Self {
            container_selector: container_selector.into(),
            ..Self::default()
        }
    }

    pub fn with_weekday_match(mut self) -> Self {
        self.match_weekday = true;
        self
    }

    pub fn with_columns(mut self, columns: [usize; 5]) -> Self {
        self.columns = columns;
        self
    }

    /// Find today's row in `html` and read its five prayer cells.
    pub fn find(&self, html: &str, today: NaiveDate) -> Result<DailyTimes> {
        let container_selector = parse_selector(&self.container_selector)?;
        let row_selector = parse_selector(&self.row_selector)?;
        let cell_selector = parse_selector("td")?;

        let document = Html::parse_document(html);
        let needles = DateNeedles::new(today, self.match_weekday);

        for container in document.select(&container_selector) {
            for row in container.select(&row_selector) {
                let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
                let Some(leading) = cells.first() else {
                    continue;
                };

                let leading_text = cell_text(leading);
                if !needles.matches(&leading_text) {
                    continue;
                }

                if let Some(times) = self.read_columns(&cells) {
                    debug!(row = %leading_text, "Matched timetable row");
                    return Ok(times);
                }
                debug!(row = %leading_text, "Matched row is missing prayer cells, skipping");
            }
        }

        Err(ExtractionError::NoMatchingRow { date: today })
    }

    fn read_columns(&self, cells: &[ElementRef]) -> Option<DailyTimes> {
        let mut times = DailyTimes::default();
        for (prayer, index) in Prayer::DAILY.iter().zip(self.columns) {
            let value = cell_text(cells.get(index)?);
            if value.is_empty() {
                return None;
            }
            times.set(*prayer, normalize_time(&value));
        }
        Some(times)
    }
}

struct DateNeedles {
    day: String,
    iso: String,
    weekday: Option<String>,
}

impl DateNeedles {
    fn new(today: NaiveDate, match_weekday: bool) -> Self {
        Self {
            day: today.day().to_string(),
            iso: today.format("%Y-%m-%d").to_string(),
            weekday: match_weekday.then(|| today.format("%A").to_string().to_lowercase()),
        }
    }

    fn matches(&self, text: &str) -> bool {
        if text.contains(&self.day) || text.contains(&self.iso) {
            return true;
        }
        self.weekday
            .as_ref()
            .is_some_and(|weekday| text.to_lowercase().contains(weekday))
    }
}

/// Element text with whitespace collapsed.
pub(crate) fn cell_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const MONTHLY: &str = r#"
        <html><body>
          <table>
            <tr><th>Date</th><th>Fajr</th><th>Dhuhr</th><th>Asr</th><th>Maghrib</th><th>Isha</th></tr>
            <tr><td>16 Oct</td><td>5:40</td><td>12:55</td><td>15:40</td><td>18:20</td><td>19:45</td></tr>
            <tr><td>17 Oct</td><td>5:42</td><td>12:55</td><td>15:38</td><td>18:18</td><td>19:43</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn reads_row_for_day_of_month() {
        let times = TableRowMatch::default()
            .find(MONTHLY, date(2026, 10, 17))
            .unwrap();

        assert_eq!(times.fajr.as_deref(), Some("05:42"));
        assert_eq!(times.dhuhr.as_deref(), Some("12:55"));
        assert_eq!(times.asr.as_deref(), Some("15:38"));
        assert_eq!(times.maghrib.as_deref(), Some("18:18"));
        assert_eq!(times.isha.as_deref(), Some("19:43"));
        assert_eq!(times.jummah, None);
    }

    #[test]
    fn matches_iso_date_in_leading_cell() {
        let html = r#"<table>
            <tr><td>2026-10-03</td><td>6:01</td><td>1:00 pm</td><td>4:10 pm</td><td>6:50 pm</td><td>8:05 pm</td></tr>
        </table>"#;

        let times = TableRowMatch::default().find(html, date(2026, 10, 3)).unwrap();
        assert_eq!(times.fajr.as_deref(), Some("06:01"));
        assert_eq!(times.isha.as_deref(), Some("20:05"));
    }

    #[test]
    fn skips_matching_row_with_blank_cells() {
        let html = r#"<table>
            <tr><td>17</td><td></td><td></td><td></td><td></td><td></td></tr>
            <tr><td>17 (jamaat)</td><td>6:00</td><td>13:15</td><td>16:00</td><td>18:25</td><td>20:00</td></tr>
        </table>"#;

        let times = TableRowMatch::default().find(html, date(2026, 10, 17)).unwrap();
        assert_eq!(times.fajr.as_deref(), Some("06:00"));
    }

    #[test]
    fn weekday_match_is_opt_in() {
        let html = r#"<table class="timetable">
            <tr><td>Saturday</td><td>5:50</td><td>13:00</td><td>15:45</td><td>18:20</td><td>19:40</td></tr>
        </table>"#;
        // 2026-10-24 is a Saturday; the weekday row is the only candidate
        let today = date(2026, 10, 24);

        assert_eq!(
            TableRowMatch::default().find(html, today),
            Err(ExtractionError::NoMatchingRow { date: today })
        );

        let times = TableRowMatch::new(".timetable, table")
            .with_weekday_match()
            .find(html, today)
            .unwrap();
        assert_eq!(times.maghrib.as_deref(), Some("18:20"));
    }

    #[test]
    fn short_rows_are_ignored() {
        let html = r#"<table><tr><td>17</td><td>5:42</td><td>12:55</td></tr></table>"#;
        assert!(TableRowMatch::default().find(html, date(2026, 10, 17)).is_err());
    }

    #[test]
    fn invalid_selector_is_reported() {
        let err = TableRowMatch::new("table[")
            .find("<table></table>", date(2026, 10, 17))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_selector");
    }
}
