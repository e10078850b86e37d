//! Extraction strategies.
//!
//! Each source picks one variant; [`Extractor`](crate::Extractor) owns the
//! fetch, timeout and fallback handling shared by all of them.

pub mod heuristic;
pub mod table;

use chrono::NaiveDate;
use scraper::Selector;
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::types::{DailyTimes, ExtractionMethod};

pub use heuristic::{HeuristicScan, DEFAULT_HEURISTIC_SELECTORS, DEFAULT_MIN_MATCHES};
pub use table::TableRowMatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Today's row in a timetable, then a text scan if no row matches
    TableRowMatch {
        table: TableRowMatch,
        heuristic: HeuristicScan,
    },
    /// Text scan only
    TextHeuristicScan(HeuristicScan),
    /// Publish the source's fixed values without fetching
    StaticOnly,
    /// No procedure yet; always unavailable
    NotImplemented,
}

impl ExtractionStrategy {
    /// Table matching with the default text scan as secondary heuristic.
    pub fn table(table: TableRowMatch) -> Self {
        ExtractionStrategy::TableRowMatch {
            table,
            heuristic: HeuristicScan::default(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionStrategy::TableRowMatch { .. } => "table-row-match",
            ExtractionStrategy::TextHeuristicScan(_) => "text-heuristic-scan",
            ExtractionStrategy::StaticOnly => "static-only",
            ExtractionStrategy::NotImplemented => "not-implemented",
        }
    }

    /// Whether the strategy reads the source page at all.
    pub fn needs_fetch(&self) -> bool {
        matches!(
            self,
            ExtractionStrategy::TableRowMatch { .. } | ExtractionStrategy::TextHeuristicScan(_)
        )
    }

    /// Run against a fetched page.
    pub fn apply(&self, html: &str, today: NaiveDate) -> Result<(DailyTimes, ExtractionMethod)> {
        match self {
            ExtractionStrategy::TableRowMatch { table, heuristic } => {
                match table.find(html, today) {
                    Ok(times) => Ok((times, ExtractionMethod::TableRow)),
                    Err(ExtractionError::NoMatchingRow { .. }) => {
                        debug!("No timetable row for today, trying text scan");
                        match heuristic.scan(html) {
                            Ok(times) => Ok((times, ExtractionMethod::Heuristic)),
                            // Nothing prayer-like at all: the row miss is the real story
                            Err(ExtractionError::InsufficientHeuristicMatches { found: 0 }) => {
                                Err(ExtractionError::NoMatchingRow { date: today })
                            }
                            Err(e) => Err(e),
                        }
                    }
                    Err(e) => Err(e),
                }
            }
            ExtractionStrategy::TextHeuristicScan(heuristic) => heuristic
                .scan(html)
                .map(|times| (times, ExtractionMethod::Heuristic)),
            ExtractionStrategy::StaticOnly | ExtractionStrategy::NotImplemented => {
                Err(ExtractionError::NotImplemented)
            }
        }
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn table_strategy_falls_through_to_text_scan() {
        let html = r#"
            <table><tr><td>Mon</td><td>5:40</td><td>12:55</td><td>15:40</td><td>18:20</td><td>19:45</td></tr></table>
            <div class="prayer-time">Fajr 5:44</div>
            <div class="prayer-time">Dhuhr 12:55</div>
            <div class="prayer-time">Maghrib 18:16</div>"#;

        let (times, method) = ExtractionStrategy::table(TableRowMatch::default())
            .apply(html, today())
            .unwrap();

        assert_eq!(method, ExtractionMethod::Heuristic);
        assert_eq!(times.fajr.as_deref(), Some("05:44"));
        assert_eq!(times.asr, None);
    }

    #[test]
    fn table_strategy_prefers_matching_row() {
        let html = r#"
            <table><tr><td>17</td><td>5:42</td><td>12:55</td><td>15:38</td><td>18:18</td><td>19:43</td></tr></table>
            <div class="prayer-time">Fajr 4:00</div>"#;

        let (times, method) = ExtractionStrategy::table(TableRowMatch::default())
            .apply(html, today())
            .unwrap();

        assert_eq!(method, ExtractionMethod::TableRow);
        assert_eq!(times.fajr.as_deref(), Some("05:42"));
    }

    #[test]
    fn empty_page_reports_missing_row() {
        let err = ExtractionStrategy::table(TableRowMatch::default())
            .apply("<html><body><p>Closed for renovation</p></body></html>", today())
            .unwrap_err();
        assert_eq!(err, ExtractionError::NoMatchingRow { date: today() });
    }

    #[test]
    fn partial_text_scan_reports_count() {
        let html = r#"<div class="prayer-time">Fajr 5:44</div>"#;
        let err = ExtractionStrategy::table(TableRowMatch::default())
            .apply(html, today())
            .unwrap_err();
        assert_eq!(err, ExtractionError::InsufficientHeuristicMatches { found: 1 });
    }

    #[test]
    fn kinds_are_stable() {
        assert_eq!(ExtractionStrategy::StaticOnly.kind(), "static-only");
        assert!(!ExtractionStrategy::StaticOnly.needs_fetch());
        assert!(ExtractionStrategy::TextHeuristicScan(HeuristicScan::default()).needs_fetch());
    }
}
