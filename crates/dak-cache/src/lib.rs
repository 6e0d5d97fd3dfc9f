//! # dak-cache
//!
//! Query cache for the DAK client. Reads of the file list, departments and
//! email threads are served from here until a mutation invalidates them.
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
