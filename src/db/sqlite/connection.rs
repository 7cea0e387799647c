//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use super::{SqliteCategoryRepository, SqlitePostRepository};
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if missing) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DbError::Connection {
                message: format!("Failed to create {}: {}", parent.display(), e),
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Each in-memory connection is its own database, so the pool is pinned
    /// to a single connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Access the underlying pool for raw queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Categories = SqliteCategoryRepository;
    type Posts = SqlitePostRepository;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!("./data/sql/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;
        debug!("Database migrations applied");
        Ok(())
    }

    fn categories(&self) -> Self::Categories {
        SqliteCategoryRepository {
            pool: self.pool.clone(),
        }
    }

    fn posts(&self) -> Self::Posts {
        SqlitePostRepository {
            pool: self.pool.clone(),
        }
    }
}
