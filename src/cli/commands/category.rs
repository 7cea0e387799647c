use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, require_force, truncate_with_ellipsis};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

pub const DEFAULT_COLOR: &str = "#8B5CF6";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct SaveCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
}

/// Fields given on the command line; unset fields keep their current value
/// on update.
#[derive(Debug, Default)]
pub struct CategoryArgs {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Tabled)]
struct CategoryDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Category> for CategoryDisplay {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            color: category.color.clone(),
            description: category
                .description
                .as_ref()
                .map(|d| truncate_with_ellipsis(d, 50))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// List all categories
pub async fn list_categories(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let response = api_client.get("/api/v1/categories").send().await?;
    let categories: Vec<Category> = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&categories)?),
        _ => Ok(format_table(&categories)),
    }
}

fn format_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let rows: Vec<CategoryDisplay> = categories.iter().map(|c| c.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

async fn fetch_category(api_client: &ApiClient, id: &str) -> CliResult<Category> {
    let response = api_client
        .get(&format!("/api/v1/categories/{}", id))
        .send()
        .await?;
    ApiClient::handle_response(response).await
}

/// Create a new category
pub async fn create_category(api_client: &ApiClient, args: CategoryArgs) -> CliResult<String> {
    let request = SaveCategoryRequest {
        name: args.name.unwrap_or_default(),
        slug: args.slug,
        description: args.description,
        color: args.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
    };

    let response = api_client
        .post("/api/v1/categories")
        .json(&request)
        .send()
        .await?;

    let category: Category = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Created category: {} ({})",
        category.name, category.id
    ))
}

/// Update a category. Fields not given keep their current value.
pub async fn update_category(
    api_client: &ApiClient,
    id: &str,
    args: CategoryArgs,
) -> CliResult<String> {
    let current = fetch_category(api_client, id).await?;

    let request = SaveCategoryRequest {
        name: args.name.unwrap_or(current.name),
        slug: Some(args.slug.unwrap_or(current.slug)),
        description: args.description.or(current.description),
        color: args.color.unwrap_or(current.color),
    };

    let response = api_client
        .put(&format!("/api/v1/categories/{}", id))
        .json(&request)
        .send()
        .await?;

    let category: Category = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Updated category: {} ({})",
        category.name, category.id
    ))
}

/// Delete a category (requires --force flag for safety)
pub async fn delete_category(api_client: &ApiClient, id: &str, force: bool) -> CliResult<String> {
    require_force(force)?;

    let response = api_client
        .delete(&format!("/api/v1/categories/{}", id))
        .send()
        .await?;
    ApiClient::handle_empty_response(response).await?;

    Ok(format!("✓ Deleted category: {}", id))
}
