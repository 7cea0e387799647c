//! SQLite CategoryRepository implementation.

use sqlx::SqlitePool;

use super::helpers::{category_from_row, map_sqlx_error};
use crate::db::utils::{current_timestamp, generate_entity_id, non_empty_or};
use crate::db::{Category, CategoryRepository, DbError, DbResult};

/// SQLx-backed category repository.
pub struct SqliteCategoryRepository {
    pub(crate) pool: SqlitePool,
}

impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, category: &Category) -> DbResult<Category> {
        let id = non_empty_or(&category.id, generate_entity_id);
        let created_at = non_empty_or(&category.created_at, current_timestamp);
        let updated_at = non_empty_or(&category.updated_at, || created_at.clone());

        sqlx::query(
            "INSERT INTO categories (id, name, slug, description, color, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.color)
        .bind(&created_at)
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Category {
            id,
            created_at,
            updated_at,
            ..category.clone()
        })
    }

    async fn get(&self, id: &str) -> DbResult<Category> {
        let row = sqlx::query(
            "SELECT id, name, slug, description, color, created_at, updated_at
             FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref()
            .map(category_from_row)
            .ok_or_else(|| DbError::not_found("Category", id))
    }

    async fn list(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT id, name, slug, description, color, created_at, updated_at
             FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    async fn update(&self, category: &Category) -> DbResult<Category> {
        let updated_at = current_timestamp();

        let result = sqlx::query(
            "UPDATE categories SET name = ?, slug = ?, description = ?, color = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.color)
        .bind(&updated_at)
        .bind(&category.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", &category.id));
        }

        self.get(&category.id).await
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    async fn count(&self) -> DbResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count as usize)
    }
}
