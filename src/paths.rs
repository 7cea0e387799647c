//! Path resolution for blog data files.
//!
//! Provides XDG-compliant path resolution with an environment override for
//! the database file.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "BLOG_DB_PATH";

/// Get XDG-compliant data directory for the blog.
///
/// # Returns
/// `$XDG_DATA_HOME/blog`, falling back to `~/.local/share/blog`, or
/// `./.blog` when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(data_home) if !data_home.is_empty() => PathBuf::from(data_home).join("blog"),
        _ => match env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".local/share/blog"),
            Err(_) => PathBuf::from(".blog"),
        },
    }
}

/// Get database file path.
///
/// `BLOG_DB_PATH` wins when set; otherwise `data_dir/blog.db`.
pub fn get_db_path() -> PathBuf {
    env::var(DB_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| get_data_dir().join("blog.db"))
}
