pub mod api_client;
mod commands;
pub mod error;
mod utils;


use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::category::{CategoryArgs, DEFAULT_COLOR};
use crate::cli::commands::post::PostArgs;
use crate::cli::error::CliResult;

#[derive(Parser)]
#[command(name = "blog")]
#[command(author, version, about = "Blog management CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: BLOG_API_URL env or http://localhost:3737)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post management commands
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Category management commands
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Insert sample categories and posts into an empty database
    Seed {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum PostCommands {
    /// List posts, newest first
    List {
        /// Only posts filed under this category ID
        #[arg(long)]
        category: Option<String>,
        /// Include drafts
        #[arg(long)]
        all: bool,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show a published post by slug
    Show {
        /// Post slug, or post ID with --id
        key: String,
        /// Look the post up by ID (drafts included)
        #[arg(long)]
        id: bool,
        /// Output format (table, json or html)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        /// Markdown body
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        /// Read the markdown body from a file
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Defaults to the slugified title
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        /// Author name
        #[arg(long)]
        author: String,
        /// Author avatar URL
        #[arg(long)]
        avatar: Option<String>,
        /// Publish immediately
        #[arg(long)]
        published: bool,
        /// Category ID (repeatable or comma-separated)
        #[arg(long = "category", required = true)]
        categories: Vec<String>,
    },
    /// Update a post; omitted fields keep their value
    Update {
        /// Post ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        /// Set the published flag (true or false)
        #[arg(long)]
        published: Option<bool>,
        /// Replace the category set (repeatable or comma-separated)
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Delete a post
    Delete {
        /// Post ID
        id: String,
        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories by name
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a category
    Create {
        #[arg(long)]
        name: String,
        /// Defaults to the slugified name
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Hex color (#RRGGBB)
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
    },
    /// Update a category; omitted fields keep their value
    Update {
        /// Category ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category; its post links are removed too
    Delete {
        /// Category ID
        id: String,
        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },
}

pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let api_client = api_client::ApiClient::new(cli.api_url);

    let output = match cli.command {
        Commands::Post { command } => match command {
            PostCommands::List {
                category,
                all,
                format,
            } => commands::post::list_posts(&api_client, category.as_deref(), all, &format).await,
            PostCommands::Show { key, id, format } => {
                commands::post::show_post(&api_client, &key, id, &format).await
            }
            PostCommands::Create {
                title,
                content,
                content_file,
                slug,
                excerpt,
                author,
                avatar,
                published,
                categories,
            } => {
                let args = PostArgs {
                    title: Some(title),
                    slug,
                    content,
                    content_file,
                    excerpt,
                    author: Some(author),
                    avatar,
                    published: Some(published),
                    categories,
                };
                commands::post::create_post(&api_client, args).await
            }
            PostCommands::Update {
                id,
                title,
                content,
                content_file,
                slug,
                excerpt,
                author,
                avatar,
                published,
                categories,
            } => {
                let args = PostArgs {
                    title,
                    slug,
                    content,
                    content_file,
                    excerpt,
                    author,
                    avatar,
                    published,
                    categories,
                };
                commands::post::update_post(&api_client, &id, args).await
            }
            PostCommands::Delete { id, force } => {
                commands::post::delete_post(&api_client, &id, force).await
            }
        },
        Commands::Category { command } => match command {
            CategoryCommands::List { format } => {
                commands::category::list_categories(&api_client, &format).await
            }
            CategoryCommands::Create {
                name,
                slug,
                description,
                color,
            } => {
                let args = CategoryArgs {
                    name: Some(name),
                    slug,
                    description,
                    color: Some(color),
                };
                commands::category::create_category(&api_client, args).await
            }
            CategoryCommands::Update {
                id,
                name,
                slug,
                description,
                color,
            } => {
                let args = CategoryArgs {
                    name,
                    slug,
                    description,
                    color,
                };
                commands::category::update_category(&api_client, &id, args).await
            }
            CategoryCommands::Delete { id, force } => {
                commands::category::delete_category(&api_client, &id, force).await
            }
        },
        Commands::Seed { format } => commands::seed::seed(&api_client, &format).await,
    }?;

    println!("{}", output);
    Ok(())
}
