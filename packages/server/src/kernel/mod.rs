//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use store::PostgresCatalogStore;
pub use test_dependencies::{MemoryCatalogStore, TestDependencies};
pub use traits::*;
