//! Email about files.

pub mod service;

pub use service::EmailService;
