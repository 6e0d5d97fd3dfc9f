//! # dak-client
//!
//! Data clients for the DAK system. [`DataClient`] is the single seam the
//! services talk to; [`RestDataClient`] calls the REST backend and
//! [`MockDataClient`] serves a local, persistent demo dataset with the
//! same call shapes. [`build_client`] picks one from configuration.

pub mod client;
pub mod factory;
pub mod mock;
pub mod rest;
pub mod session;

pub use client::{Attachment, DataClient};
pub use factory::build_client;
pub use mock::MockDataClient;
pub use rest::RestDataClient;
pub use session::{Session, SessionState, SessionStore};
