//! Authentication entities.

pub mod model;

pub use model::{AuthTokens, AuthUser, Credentials};
