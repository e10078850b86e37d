pub mod mosque;
pub mod operating_hours;

pub use mosque::{Mosque, MosqueKind, MosqueSource, NewMosque, ProvisionedRow};
pub use operating_hours::{DayHours, WeeklyHours};
