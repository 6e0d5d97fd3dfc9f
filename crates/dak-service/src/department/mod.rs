//! Department list management.

pub mod service;

pub use service::DepartmentService;
