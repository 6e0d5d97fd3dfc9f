//! Core traits defined in `dak-core` and implemented by other crates.

pub mod cache;
pub mod kv_store;

pub use cache::CacheProvider;
pub use kv_store::KeyValueStore;
