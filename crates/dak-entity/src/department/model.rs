//! Department entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dak_core::types::DepartmentId;

/// Label of the selection entry that reveals a custom name input.
pub const OTHER_DEPARTMENT: &str = "Other";

/// An organizational unit a file belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique department identifier.
    pub id: DepartmentId,
    /// Display name.
    pub name: String,
    /// Whether a user added this department.
    #[serde(default, alias = "isCustom")]
    pub is_custom: bool,
    /// When the department was created.
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Department {
    /// A pre-seeded department.
    pub fn seeded(name: impl Into<String>) -> Self {
        Self {
            id: DepartmentId::new(),
            name: name.into(),
            is_custom: false,
            created_at: Some(Utc::now()),
        }
    }

    /// Whether this is the reserved "Other" entry, in any letter case.
    pub fn is_other(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(OTHER_DEPARTMENT)
    }
}

/// Data required to add a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    /// Display name.
    pub name: String,
    /// Whether a user added this department.
    pub is_custom: bool,
}

impl NewDepartment {
    /// A user-added department.
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            is_custom: true,
        }
    }
}
