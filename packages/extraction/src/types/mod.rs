//! Extraction data types.

pub mod outcome;
pub mod time_of_day;
pub mod times;

pub use outcome::{ExtractionMethod, ExtractionOutcome};
pub use time_of_day::{find_time_token, normalize_time};
pub use times::{DailyTimes, Prayer};
