//! Outbound email entities.

pub mod model;
pub mod status;

pub use model::{EmailThread, SendEmailRequest, SendEmailResponse};
pub use status::EmailStatus;
