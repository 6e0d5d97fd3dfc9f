//! User-facing outcome messages.

use std::fmt;

use serde::{Deserialize, Serialize};

use dak_core::error::AppError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// The action worked.
    Success,
    /// The action worked with a caveat.
    Warning,
    /// The action failed.
    Error,
}

/// A short message for the user about the result of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Headline.
    pub title: String,
    /// Details.
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// A warning notice.
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// An error notice for a failed call.
    pub fn from_error(err: &AppError) -> Self {
        Self::error("Error", err.message.clone())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}: {}", self.title, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_keeps_message() {
        let notice = Notice::from_error(&AppError::not_found("File not found"));
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.to_string(), "Error: File not found");
    }

    #[test]
    fn test_display_without_message() {
        assert_eq!(Notice::success("Signed out", "").to_string(), "Signed out");
    }
}
