//! Email thread entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dak_core::types::{EmailThreadId, FileId};

use super::status::EmailStatus;
use crate::wire;

/// One logged outbound email about a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailThread {
    /// Unique thread identifier.
    pub id: EmailThreadId,
    /// The file the email is about.
    #[serde(default, alias = "file_id", skip_serializing_if = "Option::is_none")]
    pub file: Option<FileId>,
    /// Sending address.
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub sender_email: String,
    /// Primary recipient.
    pub recipient_email: String,
    /// Copied address, empty when none.
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub cc_email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub message_body: String,
    /// Attachment location, if any.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::empty_as_none"
    )]
    pub attachment_path: Option<String>,
    /// Delivery state.
    #[serde(default)]
    pub status: EmailStatus,
    /// Provider error when delivery failed.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::empty_as_none"
    )]
    pub error_message: Option<String>,
    /// When the email was logged.
    pub created_at: DateTime<Utc>,
}

/// Body of a send-email call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    /// Primary recipient.
    pub recipient_email: String,
    /// Copied address, empty when none.
    pub cc_email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message_body: String,
    /// Attachment location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Attachment file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// The file the email is about.
    pub file_id: FileId,
}

/// Result of a send-email call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SendEmailResponse {
    /// Whether the provider accepted the message.
    #[serde(default)]
    pub success: bool,
    /// Provider error when it did not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
