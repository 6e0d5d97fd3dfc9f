//! Cache key builders for all DAK query cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all DAK cache keys.
const PREFIX: &str = "dak";

// ── File keys ──────────────────────────────────────────────

/// Cache key for the full file list with embedded history.
pub fn file_list() -> String {
    format!("{PREFIX}:files:list")
}

/// Cache key for a single file by ID.
pub fn file_by_id(file_id: Uuid) -> String {
    format!("{PREFIX}:files:{file_id}")
}

/// Pattern matching every file cache entry.
pub fn files_pattern() -> String {
    format!("{PREFIX}:files:*")
}

// ── Department keys ────────────────────────────────────────

/// Cache key for the department list.
pub fn department_list() -> String {
    format!("{PREFIX}:departments")
}

// ── Email keys ─────────────────────────────────────────────

/// Cache key for the email threads of a file.
pub fn email_threads(file_id: Uuid) -> String {
    format!("{PREFIX}:email_threads:{file_id}")
}
