//! Input forms: required-field checks and submission sequencing.

pub mod create;
pub mod department;
pub mod edit;
pub mod email;

pub use create::{CreateFileForm, CreateOutcome};
pub use department::{DepartmentChoice, DepartmentSelection};
pub use edit::EditFileForm;
pub use email::EmailComposer;
