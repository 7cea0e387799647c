//! Shared helper functions for SQLite repositories.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::{Category, DbError, PostRecord, PostSort};

/// Map a SQLx error, surfacing UNIQUE and FOREIGN KEY failures as
/// `DbError::Constraint` and CHECK failures as `DbError::Validation`.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() || db_err.is_foreign_key_violation() => {
            DbError::Constraint {
                message: db_err.message().to_string(),
            }
        }
        Some(db_err) if db_err.is_check_violation() => DbError::Validation {
            message: db_err.message().to_string(),
        },
        _ => DbError::Database {
            message: e.to_string(),
        },
    }
}

/// Build the ORDER BY clause for post listings.
///
/// Rows of the same post stay adjacent so the caller can group them.
pub fn build_post_order_clause(sort: PostSort) -> String {
    format!(
        "ORDER BY p.{} DESC, p.id ASC, c.name ASC",
        sort.column()
    )
}

pub fn category_from_row(row: &SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        description: row.get("description"),
        color: row.get("color"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Read the joined category columns (aliased `c_*`) from a post row.
/// Returns `None` when the LEFT JOIN found no category.
pub fn joined_category_from_row(row: &SqliteRow) -> Option<Category> {
    let id: Option<String> = row.get("c_id");
    id.map(|id| Category {
        id,
        name: row.get("c_name"),
        slug: row.get("c_slug"),
        description: row.get("c_description"),
        color: row.get("c_color"),
        created_at: row.get("c_created_at"),
        updated_at: row.get("c_updated_at"),
    })
}

pub fn post_record_from_row(row: &SqliteRow) -> PostRecord {
    PostRecord {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        content: row.get("content"),
        excerpt: row.get("excerpt"),
        author_name: row.get("author_name"),
        author_avatar: row.get("author_avatar"),
        published: row.get("published"),
        published_at: row.get("published_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_clause_uses_sort_column() {
        assert_eq!(
            build_post_order_clause(PostSort::PublishedAt),
            "ORDER BY p.published_at DESC, p.id ASC, c.name ASC"
        );
        assert_eq!(
            build_post_order_clause(PostSort::CreatedAt),
            "ORDER BY p.created_at DESC, p.id ASC, c.name ASC"
        );
    }

    #[test]
    fn non_database_errors_map_to_database_variant() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Database { .. }));
    }
}
