//! Page fetcher implementations.

pub mod http;
pub mod mock;

pub use http::{HttpFetcher, DEFAULT_USER_AGENT};
pub use mock::MockFetcher;
