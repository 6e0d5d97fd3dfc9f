//! Response body normalization and error extraction.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use dak_core::error::AppError;
use dak_core::result::AppResult;

/// A response body reduced to the three shapes the backend produces.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// `application/json` content.
    Json(serde_json::Value),
    /// Any other content.
    Text(String),
    /// No content, as in a 204.
    Empty,
}

impl ResponseBody {
    /// Classify a raw body by its content type.
    pub fn from_parts(content_type: Option<&str>, raw: String) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::Empty);
        }
        let is_json = content_type
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false);
        if is_json {
            Ok(Self::Json(serde_json::from_str(&raw)?))
        } else {
            Ok(Self::Text(raw))
        }
    }

    /// Deserialize the body into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> AppResult<T> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value)?),
            Self::Text(text) => serde_json::from_str(&text).map_err(|e| {
                AppError::external(format!("Expected a JSON response, got text: {e}"))
            }),
            Self::Empty => Err(AppError::external("Expected a JSON response, got none")),
        }
    }
}

/// Build the error for a non-success response.
///
/// Prefers the backend's own message (`detail`, `error` or `message`),
/// then the raw text, then a generic line.
pub fn error_for_status(status: StatusCode, body: &str) -> AppError {
    let message = extract_message(body)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    AppError::from_http_status(status.as_u16(), message)
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["detail", "error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
        if let Some(fields) = value.as_object() {
            // DRF field errors: {"title": ["This field is required."]}
            let joined: Vec<String> = fields
                .iter()
                .filter_map(|(field, errors)| {
                    errors
                        .as_array()
                        .and_then(|list| list.first())
                        .and_then(|first| first.as_str())
                        .map(|first| format!("{field}: {first}"))
                })
                .collect();
            if !joined.is_empty() {
                return Some(joined.join("; "));
            }
        }
    }
    Some(trimmed.to_string())
}
