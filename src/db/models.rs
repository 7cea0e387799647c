//! Domain models for the blog database.
//!
//! Rows are stored flat; a post read with its join rows comes back in the
//! nested shape (`PostWithCategories`) and is flattened into a `Post` by
//! `crate::blog::mapper`.

use serde::{Deserialize, Serialize};

/// UUID string used as primary key for posts and categories.
pub type Id = String;

/// A category posts can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Hex color, `#RRGGBB`.
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A row of the `posts` table, without any category information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: Id,
    pub title: String,
    pub slug: String,
    /// Markdown source.
    pub content: String,
    pub excerpt: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub published: bool,
    /// Set exactly when `published` is true.
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A row of the `post_categories` join table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostCategoryRow {
    pub post_id: Id,
    pub category_id: Id,
}

/// One nested join element: the join row's category id plus the joined
/// category, which is `None` when the category row could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    pub category_id: Id,
    pub category: Option<Category>,
}

/// A post as read through the post -> post_categories -> categories join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithCategories {
    #[serde(flatten)]
    pub post: PostRecord,
    #[serde(default)]
    pub post_categories: Vec<CategoryLink>,
}

/// A post with its categories flattened into a plain list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
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
    /// Whether the post is filed under the given category.
    pub fn has_category(&self, category_id: &str) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }

    /// Ids of the post's categories, in list order.
    pub fn category_ids(&self) -> Vec<Id> {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }
}

/// Column a post listing is ordered by (always descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    #[default]
    CreatedAt,
    PublishedAt,
}

impl PostSort {
    pub fn column(&self) -> &'static str {
        match self {
            PostSort::CreatedAt => "created_at",
            PostSort::PublishedAt => "published_at",
        }
    }
}

/// Query for posts.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Only return rows with `published = 1`.
    pub published_only: bool,
    /// Exact slug match.
    pub slug: Option<String>,
    pub sort_by: PostSort,
}

impl PostQuery {
    /// Public listing: published posts, newest publication first.
    pub fn published() -> Self {
        Self {
            published_only: true,
            slug: None,
            sort_by: PostSort::PublishedAt,
        }
    }

    /// Dashboard listing: every post, newest first.
    pub fn all() -> Self {
        Self::default()
    }
}
