//! Seed handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::blog::SeedReport;
use crate::db::Database;

/// Seed outcome DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub success: bool,
    #[schema(example = "Successfully seeded database with 12 categories and 6 posts")]
    pub message: String,
    #[schema(example = 12)]
    pub categories_inserted: usize,
    #[schema(example = 6)]
    pub posts_inserted: usize,
    #[schema(example = 14)]
    pub links_inserted: usize,
}

impl From<SeedReport> for SeedResponse {
    fn from(r: SeedReport) -> Self {
        Self {
            success: r.success,
            message: r.message,
            categories_inserted: r.categories_inserted,
            posts_inserted: r.posts_inserted,
            links_inserted: r.links_inserted,
        }
    }
}

/// Seed sample categories and posts
///
/// Writes nothing when categories already exist
#[utoipa::path(
    post,
    path = "/api/v1/seed",
    tag = "system",
    responses(
        (status = 200, description = "Seeded, or already seeded", body = SeedResponse),
        (status = 500, description = "Seeding failed", body = SeedResponse)
    )
)]
#[instrument(skip(state))]
pub async fn seed<D: Database>(State(state): State<AppState<D>>) -> (StatusCode, Json<SeedResponse>) {
    let report = state.service().seed().await;
    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(SeedResponse::from(report)))
}
