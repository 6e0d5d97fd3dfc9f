//! Sign-in, registration and the authentication guard.

pub mod guard;
pub mod service;

pub use guard::AuthGuard;
pub use service::AuthService;
