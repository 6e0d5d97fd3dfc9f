//! Department entities.

pub mod model;

pub use model::{Department, NewDepartment, OTHER_DEPARTMENT};
