//! SQLite PostRepository implementation.
//!
//! Reads go through a single LEFT JOIN across `posts`, `post_categories`
//! and `categories`; the flat rows are then grouped back into one
//! `PostWithCategories` per post.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{
    build_post_order_clause, joined_category_from_row, map_sqlx_error, post_record_from_row,
};
use crate::db::utils::{current_timestamp, generate_entity_id, non_empty_or};
use crate::db::{
    CategoryLink, DbError, DbResult, PostCategoryRow, PostQuery, PostRecord, PostRepository,
    PostSort, PostWithCategories,
};

const SELECT_POSTS_WITH_CATEGORIES: &str = "SELECT
        p.id, p.title, p.slug, p.content, p.excerpt, p.author_name, p.author_avatar,
        p.published, p.published_at, p.created_at, p.updated_at,
        pc.category_id AS link_category_id,
        c.id AS c_id, c.name AS c_name, c.slug AS c_slug, c.description AS c_description,
        c.color AS c_color, c.created_at AS c_created_at, c.updated_at AS c_updated_at
     FROM posts p
     LEFT JOIN post_categories pc ON pc.post_id = p.id
     LEFT JOIN categories c ON c.id = pc.category_id";

/// SQLx-backed post repository.
pub struct SqlitePostRepository {
    pub(crate) pool: SqlitePool,
}

/// Group joined rows into posts. Rows for one post must be adjacent.
fn group_rows(rows: &[SqliteRow]) -> Vec<PostWithCategories> {
    let mut posts: Vec<PostWithCategories> = Vec::new();

    for row in rows {
        let id: String = row.get("id");
        let is_same_post = posts.last().is_some_and(|last| last.post.id == id);
        if !is_same_post {
            posts.push(PostWithCategories {
                post: post_record_from_row(row),
                post_categories: Vec::new(),
            });
        }

        let link_category_id: Option<String> = row.get("link_category_id");
        if let (Some(category_id), Some(current)) = (link_category_id, posts.last_mut()) {
            current.post_categories.push(CategoryLink {
                category_id,
                category: joined_category_from_row(row),
            });
        }
    }

    posts
}

impl SqlitePostRepository {
    async fn fetch_nested(
        &self,
        conditions: &[&str],
        binds: &[String],
        sort: PostSort,
    ) -> DbResult<Vec<PostWithCategories>> {
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{}{} {}",
            SELECT_POSTS_WITH_CATEGORIES,
            where_clause,
            build_post_order_clause(sort)
        );

        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(group_rows(&rows))
    }
}

impl PostRepository for SqlitePostRepository {
    async fn create(&self, post: &PostRecord, category_ids: &[String]) -> DbResult<PostRecord> {
        let id = non_empty_or(&post.id, generate_entity_id);
        let created_at = non_empty_or(&post.created_at, current_timestamp);
        let updated_at = non_empty_or(&post.updated_at, || created_at.clone());

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            "INSERT INTO posts (id, title, slug, content, excerpt, author_name, author_avatar,
                                published, published_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.author_name)
        .bind(&post.author_avatar)
        .bind(post.published)
        .bind(&post.published_at)
        .bind(&created_at)
        .bind(&updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        for category_id in category_ids {
            sqlx::query("INSERT INTO post_categories (post_id, category_id) VALUES (?, ?)")
                .bind(&id)
                .bind(category_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(PostRecord {
            id,
            created_at,
            updated_at,
            ..post.clone()
        })
    }

    async fn get_record(&self, id: &str) -> DbResult<PostRecord> {
        let row = sqlx::query(
            "SELECT id, title, slug, content, excerpt, author_name, author_avatar,
                    published, published_at, created_at, updated_at
             FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref()
            .map(post_record_from_row)
            .ok_or_else(|| DbError::not_found("Post", id))
    }

    async fn get(&self, id: &str) -> DbResult<PostWithCategories> {
        self.fetch_nested(&["p.id = ?"], &[id.to_string()], PostSort::CreatedAt)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("Post", id))
    }

    async fn list(&self, query: &PostQuery) -> DbResult<Vec<PostWithCategories>> {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();
        if query.published_only {
            conditions.push("p.published = 1");
        }
        if let Some(slug) = &query.slug {
            conditions.push("p.slug = ?");
            binds.push(slug.clone());
        }

        self.fetch_nested(&conditions, &binds, query.sort_by).await
    }

    async fn update(&self, post: &PostRecord, category_ids: &[String]) -> DbResult<PostRecord> {
        let updated_at = current_timestamp();

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query(
            "UPDATE posts SET title = ?, slug = ?, content = ?, excerpt = ?, author_name = ?,
                              author_avatar = ?, published = ?, published_at = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.author_name)
        .bind(&post.author_avatar)
        .bind(post.published)
        .bind(&post.published_at)
        .bind(&updated_at)
        .bind(&post.id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Post", &post.id));
        }

        // Replace the full category set.
        sqlx::query("DELETE FROM post_categories WHERE post_id = ?")
            .bind(&post.id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        for category_id in category_ids {
            sqlx::query("INSERT INTO post_categories (post_id, category_id) VALUES (?, ?)")
                .bind(&post.id)
                .bind(category_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(PostRecord {
            updated_at,
            ..post.clone()
        })
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Post", id));
        }

        Ok(())
    }

    async fn link_categories(&self, rows: &[PostCategoryRow]) -> DbResult<usize> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        for row in rows {
            sqlx::query("INSERT INTO post_categories (post_id, category_id) VALUES (?, ?)")
                .bind(&row.post_id)
                .bind(&row.category_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(rows.len())
    }
}
