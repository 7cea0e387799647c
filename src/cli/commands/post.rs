use std::path::PathBuf;

use crate::cli::api_client::ApiClient;
use crate::cli::commands::category::Category;
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{
    apply_table_style, format_list, parse_ids, read_content_file, require_force,
    truncate_with_ellipsis,
};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

const PREVIEW_CHARS: usize = 300;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub published: bool,
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Post {
    /// Whether the post is filed under the given category id.
    pub fn has_category(&self, category_id: &str) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }

    fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PostDetail {
    #[serde(flatten)]
    post: Post,
    content_html: String,
}

#[derive(Debug, Serialize)]
pub struct SavePostRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub published: bool,
    pub category_ids: Vec<String>,
}

/// Fields given on the command line; unset fields keep their current value
/// on update.
#[derive(Debug, Default)]
pub struct PostArgs {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub content_file: Option<PathBuf>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub avatar: Option<String>,
    pub published: Option<bool>,
    pub categories: Vec<String>,
}

impl PostArgs {
    fn content(&self) -> CliResult<Option<String>> {
        match (&self.content, &self.content_file) {
            (Some(_), Some(_)) => Err(CliError::InvalidInput {
                message: "Use either --content or --content-file, not both".to_string(),
            }),
            (Some(content), None) => Ok(Some(content.clone())),
            (None, Some(path)) => read_content_file(path).map(Some),
            (None, None) => Ok(None),
        }
    }
}

#[derive(Tabled)]
struct PostDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Categories")]
    categories: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl From<&Post> for PostDisplay {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: truncate_with_ellipsis(&post.title, 40),
            author: post.author_name.clone(),
            status: status_label(post.published).to_string(),
            categories: truncate_with_ellipsis(&format_list(&post.category_names()), 40),
            date: post
                .published_at
                .clone()
                .unwrap_or_else(|| post.created_at.clone()),
        }
    }
}

fn status_label(published: bool) -> &'static str {
    if published { "published" } else { "draft" }
}

/// List posts. Without `all`, only published posts are listed, optionally
/// narrowed to one category id.
pub async fn list_posts(
    api_client: &ApiClient,
    category: Option<&str>,
    all: bool,
    format: &str,
) -> CliResult<String> {
    let posts: Vec<Post> = if all {
        let response = api_client.get("/api/v1/dashboard/posts").send().await?;
        let posts: Vec<Post> = ApiClient::handle_response(response).await?;
        match category {
            Some(id) => posts.into_iter().filter(|p| p.has_category(id)).collect(),
            None => posts,
        }
    } else {
        let mut request = api_client.get("/api/v1/posts");
        if let Some(id) = category {
            request = request.query(&[("category", id)]);
        }
        ApiClient::handle_response(request.send().await?).await?
    };

    match format {
        "json" => Ok(serde_json::to_string_pretty(&posts)?),
        _ => Ok(format_table(&posts)),
    }
}

fn format_table(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts found.".to_string();
    }

    let rows: Vec<PostDisplay> = posts.iter().map(|p| p.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

/// Show a published post by slug, or any post by id when `by_id` is set.
pub async fn show_post(
    api_client: &ApiClient,
    key: &str,
    by_id: bool,
    format: &str,
) -> CliResult<String> {
    if by_id {
        let post = fetch_post(api_client, key).await?;
        return match format {
            "json" => Ok(serde_json::to_string_pretty(&post)?),
            _ => Ok(format_post_detail(&post)),
        };
    }

    let response = api_client
        .get(&format!("/api/v1/posts/{}", key))
        .send()
        .await?;
    let detail: PostDetail = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&detail)?),
        "html" => Ok(detail.content_html),
        _ => Ok(format_post_detail(&detail.post)),
    }
}

fn format_post_detail(post: &Post) -> String {
    use tabled::builder::Builder;

    let mut builder = Builder::default();

    builder.push_record(["Post ID", &post.id]);
    builder.push_record(["Title", &post.title]);
    builder.push_record(["Slug", &post.slug]);
    builder.push_record(["Author", &post.author_name]);
    builder.push_record(["Status", status_label(post.published)]);

    if let Some(published_at) = &post.published_at {
        builder.push_record(["Published", published_at]);
    }

    if !post.categories.is_empty() {
        builder.push_record(["Categories", &format_list(&post.category_names())]);
    }

    if let Some(excerpt) = &post.excerpt {
        builder.push_record(["Excerpt", excerpt]);
    }

    builder.push_record([
        "Content",
        &crate::blog::markdown::preview(&post.content, PREVIEW_CHARS),
    ]);
    builder.push_record(["Created", &post.created_at]);
    builder.push_record(["Updated", &post.updated_at]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}

async fn fetch_post(api_client: &ApiClient, id: &str) -> CliResult<Post> {
    let response = api_client
        .get(&format!("/api/v1/dashboard/posts/{}", id))
        .send()
        .await?;
    ApiClient::handle_response(response).await
}

/// Create a new post. Title, content, author and category checks happen
/// server side so the CLI reports the same field errors as the API.
pub async fn create_post(api_client: &ApiClient, args: PostArgs) -> CliResult<String> {
    let content = args.content()?.unwrap_or_default();

    let request = SavePostRequest {
        title: args.title.unwrap_or_default(),
        slug: args.slug,
        content,
        excerpt: args.excerpt,
        author_name: args.author.unwrap_or_default(),
        author_avatar: args.avatar,
        published: args.published.unwrap_or(false),
        category_ids: parse_ids(&args.categories),
    };

    let response = api_client
        .post("/api/v1/dashboard/posts")
        .json(&request)
        .send()
        .await?;

    let post: Post = ApiClient::handle_response(response).await?;
    Ok(format!("✓ Created post: {} ({})", post.title, post.id))
}

/// Update a post. The current post is fetched first and the given fields
/// are merged over it, since the API replaces the whole post.
pub async fn update_post(api_client: &ApiClient, id: &str, args: PostArgs) -> CliResult<String> {
    let content = args.content()?;
    let current = fetch_post(api_client, id).await?;

    let category_ids = if args.categories.is_empty() {
        current.categories.iter().map(|c| c.id.clone()).collect()
    } else {
        parse_ids(&args.categories)
    };

    let request = SavePostRequest {
        title: args.title.unwrap_or(current.title),
        slug: Some(args.slug.unwrap_or(current.slug)),
        content: content.unwrap_or(current.content),
        excerpt: args.excerpt.or(current.excerpt),
        author_name: args.author.unwrap_or(current.author_name),
        author_avatar: args.avatar.or(current.author_avatar),
        published: args.published.unwrap_or(current.published),
        category_ids,
    };

    let response = api_client
        .put(&format!("/api/v1/dashboard/posts/{}", id))
        .json(&request)
        .send()
        .await?;

    let post: Post = ApiClient::handle_response(response).await?;
    Ok(format!("✓ Updated post: {} ({})", post.title, post.id))
}

/// Delete a post (requires --force flag for safety)
pub async fn delete_post(api_client: &ApiClient, id: &str, force: bool) -> CliResult<String> {
    require_force(force)?;

    let response = api_client
        .delete(&format!("/api/v1/dashboard/posts/{}", id))
        .send()
        .await?;
    ApiClient::handle_empty_response(response).await?;

    Ok(format!("✓ Deleted post: {}", id))
}
