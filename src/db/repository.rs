//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Methods return `Send` futures so generic callers (axum handlers) can be
//! spawned on the multi-threaded runtime; implementations may still be
//! written as plain `async fn`.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Category, PostCategoryRow, PostQuery, PostRecord, PostWithCategories},
};

/// Repository for Category operations.
pub trait CategoryRepository {
    /// Insert a category. Generates id and timestamps when they are empty.
    fn create(&self, category: &Category) -> impl Future<Output = DbResult<Category>> + Send;

    /// Get a category by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Category>> + Send;

    /// Get all categories ordered by name.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Category>>> + Send;

    /// Update name, slug, description and color of an existing category.
    fn update(&self, category: &Category) -> impl Future<Output = DbResult<Category>> + Send;

    /// Delete a category by ID. Join rows cascade.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Number of category rows.
    fn count(&self) -> impl Future<Output = DbResult<usize>> + Send;
}

/// Repository for Post operations.
pub trait PostRepository {
    /// Insert the post row, then one join row per category id.
    fn create(
        &self,
        post: &PostRecord,
        category_ids: &[String],
    ) -> impl Future<Output = DbResult<PostRecord>> + Send;

    /// Get a post row by ID, without categories.
    fn get_record(&self, id: &str) -> impl Future<Output = DbResult<PostRecord>> + Send;

    /// Get a post by ID with its nested join rows.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<PostWithCategories>> + Send;

    /// List posts with their nested join rows.
    fn list(
        &self,
        query: &PostQuery,
    ) -> impl Future<Output = DbResult<Vec<PostWithCategories>>> + Send;

    /// Update the post row in place, then replace all of its join rows.
    fn update(
        &self,
        post: &PostRecord,
        category_ids: &[String],
    ) -> impl Future<Output = DbResult<PostRecord>> + Send;

    /// Delete a post by ID. Join rows cascade.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Insert join rows as given.
    fn link_categories(
        &self,
        rows: &[PostCategoryRow],
    ) -> impl Future<Output = DbResult<usize>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Categories: CategoryRepository + Send + Sync;
    type Posts: PostRepository + Send + Sync;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the category repository.
    fn categories(&self) -> Self::Categories;

    /// Get the post repository.
    fn posts(&self) -> Self::Posts;
}
