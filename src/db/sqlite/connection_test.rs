//! Tests for SQLite database connection and migrations.

use crate::db::{CategoryRepository, Database, SqliteDatabase};

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_all_tables() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("Migration should succeed");

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");

    for table in ["_sqlx_migrations", "categories", "post_categories", "posts"] {
        assert!(
            tables.iter().any(|t| t == table),
            "Missing table: {}. Found tables: {:?}",
            table,
            tables
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.expect("First migration should succeed");
    db.migrate().await.expect("Second migration should be a no-op");
}

#[tokio::test(flavor = "multi_thread")]
async fn foreign_keys_are_enforced() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(enabled, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn open_creates_database_file_and_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("blog.db");

    let db = SqliteDatabase::open(&path).await.expect("open should succeed");
    db.migrate().await.unwrap();

    assert!(path.exists());
    assert_eq!(db.categories().count().await.unwrap(), 0);
}
