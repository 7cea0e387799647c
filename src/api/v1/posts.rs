//! Post handlers: public reading and dashboard management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use super::{ApiError, CategoryResponse, ErrorResponse, error_response};
use crate::api::AppState;
use crate::blog::PostInput;
use crate::blog::markdown::render_markdown;
use crate::db::{Database, Post};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Post response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    /// Unique identifier (UUID)
    #[schema(example = "0b6f3c9e-5d0a-4e8e-9a55-6c1d2f7a4b10")]
    pub id: String,
    #[schema(example = "UX review presentations")]
    pub title: String,
    #[schema(example = "ux-review-presentations")]
    pub slug: String,
    /// Markdown source
    #[schema(example = "# UX review presentations\n\n...")]
    pub content: String,
    #[schema(example = "How do you create compelling presentations?")]
    pub excerpt: Option<String>,
    #[schema(example = "Olivia Rhye")]
    pub author_name: String,
    #[schema(example = "https://example.com/olivia.png")]
    pub author_avatar: Option<String>,
    pub published: bool,
    #[schema(example = "2025-01-20 00:00:00")]
    pub published_at: Option<String>,
    #[schema(example = "2025-01-20 00:00:00")]
    pub created_at: String,
    #[schema(example = "2025-01-20 00:00:00")]
    pub updated_at: String,
    pub categories: Vec<CategoryResponse>,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            content: p.content,
            excerpt: p.excerpt,
            author_name: p.author_name,
            author_avatar: p.author_avatar,
            published: p.published,
            published_at: p.published_at,
            created_at: p.created_at,
            updated_at: p.updated_at,
            categories: p
                .categories
                .into_iter()
                .map(CategoryResponse::from)
                .collect(),
        }
    }
}

/// Post detail DTO with rendered HTML body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    /// `content` rendered from markdown
    #[schema(example = "<h1>UX review presentations</h1>")]
    pub content_html: String,
}

impl From<Post> for PostDetailResponse {
    fn from(p: Post) -> Self {
        let content_html = render_markdown(&p.content);
        Self {
            post: PostResponse::from(p),
            content_html,
        }
    }
}

/// Create/update post request DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SavePostRequest {
    #[schema(example = "What is wireframing?")]
    pub title: String,
    /// Derived from the title when omitted
    #[schema(example = "what-is-wireframing")]
    pub slug: Option<String>,
    #[schema(example = "## Introduction\n\nWireframes are...")]
    pub content: String,
    #[schema(example = "Introduction to Wireframing and its Principles.")]
    pub excerpt: Option<String>,
    #[schema(example = "Candice Wu")]
    pub author_name: String,
    pub author_avatar: Option<String>,
    #[serde(default)]
    pub published: bool,
    /// At least one category ID
    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl From<SavePostRequest> for PostInput {
    fn from(req: SavePostRequest) -> Self {
        Self {
            title: req.title,
            slug: req.slug,
            content: req.content,
            excerpt: req.excerpt,
            author_name: req.author_name,
            author_avatar: req.author_avatar,
            published: req.published,
            category_ids: req.category_ids,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPostsQuery {
    /// Only posts filed under this category ID
    pub category: Option<String>,
}

// =============================================================================
// Public handlers
// =============================================================================

/// List published posts
///
/// Newest publication first, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Published posts", body = Vec<PostResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_published_posts<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let posts = state
        .service()
        .published_posts(category)
        .await
        .map_err(error_response)?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Get a published post by slug
#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}",
    tag = "posts",
    params(
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDetailResponse),
        (status = 404, description = "No published post with this slug", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_published_post<D: Database>(
    State(state): State<AppState<D>>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let post = state
        .service()
        .published_post(&slug)
        .await
        .map_err(error_response)?;

    Ok(Json(PostDetailResponse::from(post)))
}

// =============================================================================
// Dashboard handlers
// =============================================================================

/// List all posts, drafts included
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/posts",
    tag = "dashboard",
    responses(
        (status = 200, description = "All posts, newest first", body = Vec<PostResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_dashboard_posts<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state
        .service()
        .dashboard_posts()
        .await
        .map_err(error_response)?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Get any post by ID
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/posts/{id}",
    tag = "dashboard",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_post<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.service().post(&id).await.map_err(error_response)?;
    Ok(Json(PostResponse::from(post)))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/posts",
    tag = "dashboard",
    request_body = SavePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 409, description = "Slug in use or unknown category", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_post<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<SavePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let post = state
        .service()
        .save_post(None, &req.into())
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// Update a post
///
/// Replaces every field and the full category set
#[utoipa::path(
    put,
    path = "/api/v1/dashboard/posts/{id}",
    tag = "dashboard",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    request_body = SavePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 409, description = "Slug in use or unknown category", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_post<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<SavePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .service()
        .save_post(Some(&id), &req.into())
        .await
        .map_err(error_response)?;

    Ok(Json(PostResponse::from(post)))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/api/v1/dashboard/posts/{id}",
    tag = "dashboard",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_post<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .service()
        .delete_post(&id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
