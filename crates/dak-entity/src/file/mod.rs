//! File domain entities.

pub mod file_type;
pub mod model;
pub mod status;

pub use file_type::FileType;
pub use model::{FileRecord, FileUpdate, NewFile};
pub use status::{FileStatus, StatusChange, StatusUpdate};
