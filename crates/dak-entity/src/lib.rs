//! # dak-entity
//!
//! Domain entity models for the DAK file-tracking system. Every struct in
//! this crate is a wire/storage record or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize` and `Deserialize`, and
//! deserialization normalizes the field-name and format variants the
//! backends emit.

pub mod department;
pub mod email;
pub mod file;
pub mod user;
pub mod wire;
