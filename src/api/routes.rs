//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::v1::{
    self, CategoryResponse, ErrorResponse, FieldErrorResponse, HealthResponse,
    PostDetailResponse, PostResponse, SaveCategoryRequest, SavePostRequest, SeedResponse,
};
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "0.1.0",
        description = "Posts, categories and the dashboard behind them"
    ),
    paths(
        v1::health,
        v1::list_published_posts,
        v1::get_published_post,
        v1::list_dashboard_posts,
        v1::get_post,
        v1::create_post,
        v1::update_post,
        v1::delete_post,
        v1::list_categories,
        v1::get_category,
        v1::create_category,
        v1::update_category,
        v1::delete_category,
        v1::seed,
    ),
    components(
        schemas(
            HealthResponse,
            PostResponse,
            PostDetailResponse,
            SavePostRequest,
            CategoryResponse,
            SaveCategoryRequest,
            SeedResponse,
            ErrorResponse,
            FieldErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "Health and seeding"),
        (name = "posts", description = "Public post reading"),
        (name = "dashboard", description = "Post management"),
        (name = "categories", description = "Category management")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/health", get(v1::health));

    let post_routes = routes!(D => {
        get "/api/v1/posts" => v1::list_published_posts,
        get "/api/v1/posts/{slug}" => v1::get_published_post,
        get "/api/v1/dashboard/posts" => v1::list_dashboard_posts,
        get "/api/v1/dashboard/posts/{id}" => v1::get_post,
        post "/api/v1/dashboard/posts" => v1::create_post,
        put "/api/v1/dashboard/posts/{id}" => v1::update_post,
        delete "/api/v1/dashboard/posts/{id}" => v1::delete_post,
    });

    let category_routes = routes!(D => {
        get "/api/v1/categories" => v1::list_categories,
        get "/api/v1/categories/{id}" => v1::get_category,
        post "/api/v1/categories" => v1::create_category,
        put "/api/v1/categories/{id}" => v1::update_category,
        delete "/api/v1/categories/{id}" => v1::delete_category,
    });

    let seed_routes = routes!(D => {
        post "/api/v1/seed" => v1::seed,
    });

    system_routes
        .merge(post_routes)
        .merge(category_routes)
        .merge(seed_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
