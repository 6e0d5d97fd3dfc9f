//! File type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction of a tracked correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileType {
    /// Sent out of the office.
    #[default]
    Dispatched,
    /// Received from outside.
    Received,
    /// Moves between departments only.
    Internal,
}

impl FileType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dispatched => "dispatched",
            Self::Received => "received",
            Self::Internal => "internal",
        }
    }

    /// Prefix used in generated file numbers.
    pub fn number_prefix(&self) -> &'static str {
        match self {
            Self::Dispatched => "DISP",
            Self::Received => "REC",
            Self::Internal => "INT",
        }
    }

    /// Whether files of this type can be flagged as needing return.
    pub fn allows_return(&self) -> bool {
        !matches!(self, Self::Internal)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileType {
    type Err = dak_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dispatched" => Ok(Self::Dispatched),
            "received" => Ok(Self::Received),
            "internal" => Ok(Self::Internal),
            _ => Err(dak_core::AppError::validation(format!(
                "Invalid file type: '{s}'. Expected one of: dispatched, received, internal"
            ))),
        }
    }
}

impl TryFrom<String> for FileType {
    type Error = dak_core::AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FileType> for String {
    fn from(value: FileType) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_any_case() {
        assert_eq!("Received".parse::<FileType>().ok(), Some(FileType::Received));
        assert_eq!("INTERNAL".parse::<FileType>().ok(), Some(FileType::Internal));
        assert!("outgoing".parse::<FileType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&FileType::Dispatched).expect("serialize");
        assert_eq!(json, "\"dispatched\"");
        let parsed: FileType = serde_json::from_str("\"Internal\"").expect("deserialize");
        assert_eq!(parsed, FileType::Internal);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(FileType::Dispatched.number_prefix(), "DISP");
        assert_eq!(FileType::Received.number_prefix(), "REC");
        assert_eq!(FileType::Internal.number_prefix(), "INT");
    }
}
