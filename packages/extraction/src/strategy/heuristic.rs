//! Prayer-name / time co-occurrence scan.
//!
//! Used when a page has no usable timetable row: look through elements that
//! look like prayer widgets and pair each prayer name with the time that
//! follows it in the element's text.

use scraper::Html;
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::strategy::{parse_selector, table::cell_text};
use crate::types::{find_time_token, normalize_time, DailyTimes, Prayer};

pub const DEFAULT_HEURISTIC_SELECTORS: &str =
    r#".prayer-card, .prayer-time, .salah-time, [class*="prayer"], [class*="salah"]"#;

/// Minimum distinct daily prayers for a scan result to be trusted.
pub const DEFAULT_MIN_MATCHES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicScan {
    pub selectors: String,
    pub min_matches: usize,
}

impl Default for HeuristicScan {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_HEURISTIC_SELECTORS.to_string(),
            min_matches: DEFAULT_MIN_MATCHES,
        }
    }
}

impl HeuristicScan {
    pub fn new(selectors: impl Into<String>) -> Self {
        Self {
            selectors: selectors.into(),
            ..Self::default()
        }
    }

    pub fn with_min_matches(mut self, min_matches: usize) -> Self {
        self.min_matches = min_matches;
        self
    }

    /// Scan `html`; the first time found for a prayer wins.
    pub fn scan(&self, html: &str) -> Result<DailyTimes> {
        let selector = parse_selector(&self.selectors)?;
        let document = Html::parse_document(html);
        let mut times = DailyTimes::default();

        for element in document.select(&selector) {
            let text = cell_text(&element).to_lowercase();

            for prayer in Prayer::DAILY {
                if times.get(prayer).is_some() {
                    continue;
                }
                let Some(position) = find_prayer_name(&text, prayer) else {
                    continue;
                };
                let token = find_time_token(&text[position..]).or_else(|| find_time_token(&text));
                if let Some(token) = token {
                    debug!(prayer = %prayer, time = %token, "Heuristic located prayer time");
                    times.set(prayer, normalize_time(token));
                }
            }

            if times.is_complete() {
                break;
            }
        }

        let found = times.daily_count();
        if found >= self.min_matches {
            Ok(times)
        } else {
            Err(ExtractionError::InsufficientHeuristicMatches { found })
        }
    }
}

/// Byte offset of the first alias of `prayer` that starts a word in `text`.
fn find_prayer_name(text: &str, prayer: Prayer) -> Option<usize> {
    prayer
        .aliases()
        .iter()
        .filter_map(|alias| {
            text.match_indices(alias)
                .map(|(index, _)| index)
                .find(|&index| {
                    text[..index]
                        .chars()
                        .next_back()
                        .map_or(true, |c| !c.is_alphabetic())
                })
        })
        .min()
}
