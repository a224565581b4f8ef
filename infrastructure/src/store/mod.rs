//! Pattern store adapters
//!
//! Implementations of [`PatternStorePort`](alias_application::PatternStorePort).

mod file_store;
mod memory;

pub use file_store::{AliasFileFormat, FilePatternStore, parse_aliases};
pub use memory::InMemoryPatternStore;
