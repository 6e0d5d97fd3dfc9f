//! # dak-service
//!
//! Business logic service layer for the DAK system. Services sit between
//! the front end and the [`DataClient`](dak_client::DataClient): they cache
//! reads, enforce the file status lifecycle, shape the file list for
//! display, and validate form input.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod department;
pub mod email;
pub mod file;
pub mod forms;
pub mod notice;
pub mod table;

pub use auth::{AuthGuard, AuthService};
pub use context::AppContext;
pub use department::DepartmentService;
pub use email::EmailService;
pub use file::{FileAction, FileNumberGenerator, FileStore, LifecycleService};
pub use notice::{Notice, NoticeLevel};
pub use table::{FileColumn, TableState, TableView};
