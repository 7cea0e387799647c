//! Category management handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{ApiError, ErrorResponse, error_response};
use crate::api::AppState;
use crate::blog::CategoryInput;
use crate::db::{Category, Database};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Category response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    /// Unique identifier (UUID)
    #[schema(example = "5f0c7e2a-1b7d-4c55-9a43-2f1f0d0c9e11")]
    pub id: String,
    #[schema(example = "Design")]
    pub name: String,
    #[schema(example = "design")]
    pub slug: String,
    #[schema(example = "UI/UX design, visual design, and design thinking")]
    pub description: Option<String>,
    /// Hex color used for badges
    #[schema(example = "#EC4899")]
    pub color: String,
    #[schema(example = "2025-01-01 00:00:00")]
    pub created_at: String,
    #[schema(example = "2025-01-01 00:00:00")]
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            color: c.color,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Create/update category request DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveCategoryRequest {
    #[schema(example = "Customer Success")]
    pub name: String,
    /// Derived from the name when omitted
    #[schema(example = "customer-success")]
    pub slug: Option<String>,
    #[schema(example = "Customer success strategies")]
    pub description: Option<String>,
    #[schema(example = "#10B981")]
    pub color: String,
}

impl From<SaveCategoryRequest> for CategoryInput {
    fn from(req: SaveCategoryRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
            color: req.color,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all categories ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_categories<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state
        .service()
        .categories()
        .await
        .map_err(error_response)?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_category<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .service()
        .category(&id)
        .await
        .map_err(error_response)?;

    Ok(Json(CategoryResponse::from(category)))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    request_body = SaveCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_category<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<SaveCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state
        .service()
        .save_category(None, &req.into())
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = SaveCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_category<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<SaveCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .service()
        .save_category(Some(&id), &req.into())
        .await
        .map_err(error_response)?;

    Ok(Json(CategoryResponse::from(category)))
}

/// Delete a category
///
/// Posts filed under the category lose that association.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_category<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .service()
        .delete_category(&id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
