//! Database utility functions.

use sqlx::types::chrono::Utc;

/// Generate a UUID v4 string for database entities
pub fn generate_entity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Get current datetime as string in SQLite format
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// Timestamps are stored as `YYYY-MM-DD HH:MM:SS` UTC strings so that
// `ORDER BY created_at` / `ORDER BY published_at` sort chronologically.
//
// create() methods keep a caller-provided id/created_at when non-empty
// (the seed utility sets publication dates explicitly) and generate fresh
// values otherwise:
//
// ```rust
// let created_at = Some(entity.created_at.clone())
//     .filter(|s| !s.is_empty())
//     .unwrap_or_else(current_timestamp);
// ```

/// Return `value` unless it is empty, otherwise the generated fallback.
pub fn non_empty_or(value: &str, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        fallback()
    } else {
        value.to_string()
    }
}
