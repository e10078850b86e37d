// HTTP routes
pub mod health;
pub mod ingest;
pub mod mosques;

pub use health::*;
pub use ingest::*;
pub use mosques::*;
