//! Department picker with an "Other" escape hatch.

use serde::{Deserialize, Serialize};

use dak_core::error::AppError;
use dak_entity::department::{Department, OTHER_DEPARTMENT};

/// What the user picked in the department field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum DepartmentChoice {
    /// A department from the managed list.
    Listed(String),
    /// "Other" with a typed-in name.
    Other(String),
}

impl DepartmentChoice {
    /// Department name stored on the file.
    pub fn name(&self) -> &str {
        match self {
            Self::Listed(name) | Self::Other(name) => name.trim(),
        }
    }
}

impl Default for DepartmentChoice {
    fn default() -> Self {
        Self::Listed(String::new())
    }
}

/// Options offered in the department field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentSelection {
    names: Vec<String>,
}

impl DepartmentSelection {
    /// Options for `departments`, hiding any stored "other" entry.
    pub fn new(departments: &[Department]) -> Self {
        let names = departments
            .iter()
            .filter(|d| !d.is_other())
            .map(|d| d.name.clone())
            .collect();
        Self { names }
    }

    /// Option labels, with "Other" last.
    pub fn options(&self) -> Vec<&str> {
        self.names
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(OTHER_DEPARTMENT))
            .collect()
    }

    /// Resolve a picked label, with the custom name used for "Other".
    pub fn choose(&self, label: &str, custom: Option<&str>) -> Result<DepartmentChoice, AppError> {
        let label = label.trim();
        if label.eq_ignore_ascii_case(OTHER_DEPARTMENT) {
            let custom = custom.map(str::trim).filter(|c| !c.is_empty()).ok_or_else(|| {
                AppError::validation("Please enter a department name")
            })?;
            return match self.find(custom) {
                Some(existing) => Ok(DepartmentChoice::Listed(existing.to_string())),
                None => Ok(DepartmentChoice::Other(custom.to_string())),
            };
        }

        self.find(label)
            .map(|name| DepartmentChoice::Listed(name.to_string()))
            .ok_or_else(|| AppError::validation(format!("Unknown department: '{label}'")))
    }

    fn find(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }
}
