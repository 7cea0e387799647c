use serde::{Deserialize, Serialize};

use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
    pub categories_inserted: usize,
    pub posts_inserted: usize,
    pub links_inserted: usize,
}

/// Seed sample categories and posts. A failed seed answers 500 with the
/// same body, so the report is read regardless of status.
pub async fn seed(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let response = api_client.post("/api/v1/seed").send().await?;
    let status = response.status().as_u16();
    let report: SeedResponse = response.json().await?;

    if format == "json" {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    if !report.success {
        return Err(CliError::ApiError {
            status,
            message: report.message,
        });
    }

    if report.categories_inserted == 0 && report.posts_inserted == 0 {
        return Ok(format!("✓ {}", report.message));
    }

    Ok(format!(
        "✓ {} ({} category links)",
        report.message, report.links_inserted
    ))
}
