// Business domains
pub mod mosques;
pub mod prayer_times;
