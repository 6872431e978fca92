//! Cache persistence layer
//!
//! Re-exports the cache store for convenient access from other modules.

pub mod store;

pub use store::{CacheStore, StoreError};
