//! # dak-core
//!
//! Core crate for the DAK file-tracking system. Contains the configuration
//! schema, typed identifiers, sorting/pagination types, the cache and
//! key/value store traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DAK crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
