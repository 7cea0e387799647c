//! Blog API server binary.
//!
//! Opens the SQLite database, applies migrations and hands the database to
//! the API layer, which only sees the `Database` trait.

use std::net::IpAddr;
use std::path::PathBuf;

use blog::api::{self, Config, DEFAULT_PORT, ServerError};
use blog::db::{Database, DbError, SqliteDatabase};
use blog::paths::get_db_path;
use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(blog::binary::database))]
    Database(#[from] DbError),

    #[error("API server error: {0}")]
    #[diagnostic(code(blog::binary::api))]
    Server(#[from] ServerError),
}

#[derive(Parser)]
#[command(name = "blog-api")]
#[command(author, version, about = "Blog API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Database file path (defaults to BLOG_DB_PATH or ~/.local/share/blog/blog.db)
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    api::init_tracing();

    let db_path = cli.db.unwrap_or_else(get_db_path);
    info!("Opening database at {}", db_path.display());

    let db = SqliteDatabase::open(&db_path).await?;
    db.migrate().await?;
    info!("Database migrations complete");

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        db,
    )
    .await?;

    Ok(())
}
