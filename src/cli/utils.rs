//! Shared utilities for CLI commands

use std::path::Path;

use tabled::{Table, settings::Style};

use crate::cli::error::{CliError, CliResult};

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Join names for a table cell, `-` when empty
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse repeated and/or comma-separated IDs into one list
pub fn parse_ids(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read markdown content from a file
pub fn read_content_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Refuse destructive operations unless `--force` was given
pub fn require_force(force: bool) -> CliResult<()> {
    if force {
        Ok(())
    } else {
        Err(CliError::InvalidInput {
            message: "Delete operation requires --force flag. This action is destructive and cannot be undone.".to_string(),
        })
    }
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}
