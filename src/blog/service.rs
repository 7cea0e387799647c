//! Query and mutation layer over a `Database`.
//!
//! Reads are memoized in per-shape query caches; every successful mutation
//! drops the cache entries for the resources it touched.

use tracing::{debug, instrument};

use super::cache::{QueryCache, key};
use super::error::{BlogError, BlogResult};
use super::mapper::{filter_by_category, flatten, flatten_all};
use super::seed::{SeedReport, seed_database};
use super::validation::{CategoryInput, PostInput, ValidPost};
use crate::db::utils::current_timestamp;
use crate::db::{
    Category, CategoryRepository, Database, Post, PostQuery, PostRecord, PostRepository,
};

const POSTS: &str = "posts";
const DASHBOARD_POSTS: &str = "dashboard-posts";
const POST: &str = "post";
const CATEGORIES: &str = "categories";
const ALL: &str = "all";

/// Compute `published_at` for a save.
///
/// Unpublished posts have none. A post that was already published keeps its
/// original timestamp; any other transition to published stamps `now`.
pub fn resolve_published_at(
    previous: Option<&PostRecord>,
    published: bool,
    now: &str,
) -> Option<String> {
    if !published {
        return None;
    }
    previous
        .filter(|p| p.published)
        .and_then(|p| p.published_at.clone())
        .or_else(|| Some(now.to_string()))
}

fn to_record(id: &str, valid: ValidPost, published_at: Option<String>, created_at: &str) -> PostRecord {
    PostRecord {
        id: id.to_string(),
        title: valid.title,
        slug: valid.slug,
        content: valid.content,
        excerpt: valid.excerpt,
        author_name: valid.author_name,
        author_avatar: valid.author_avatar,
        published: valid.published,
        published_at,
        created_at: created_at.to_string(),
        updated_at: String::new(),
    }
}

pub struct BlogService<D: Database> {
    db: D,
    post_lists: QueryCache<Vec<Post>>,
    posts_by_slug: QueryCache<Post>,
    category_lists: QueryCache<Vec<Category>>,
}

impl<D: Database> BlogService<D> {
    pub fn new(db: D) -> Self {
        Self {
            db,
            post_lists: QueryCache::new(),
            posts_by_slug: QueryCache::new(),
            category_lists: QueryCache::new(),
        }
    }


    // =========================================================================
    // Queries
    // =========================================================================

    /// Published posts, newest publication first, optionally restricted to
    /// one category.
    #[instrument(skip(self))]
    pub async fn published_posts(&self, category: Option<&str>) -> BlogResult<Vec<Post>> {
        let cache_key = key(&[POSTS, category.unwrap_or(ALL)]);
        self.post_lists
            .get_or_fetch(cache_key, || async {
                let nested = self.db.posts().list(&PostQuery::published()).await?;
                let posts = flatten_all(nested);
                Ok::<_, BlogError>(match category {
                    Some(id) => filter_by_category(posts, id),
                    None => posts,
                })
            })
            .await
    }

    /// Every post, drafts included, newest first.
    #[instrument(skip(self))]
    pub async fn dashboard_posts(&self) -> BlogResult<Vec<Post>> {
        self.post_lists
            .get_or_fetch(key(&[DASHBOARD_POSTS]), || async {
                let nested = self.db.posts().list(&PostQuery::all()).await?;
                Ok::<_, BlogError>(flatten_all(nested))
            })
            .await
    }

    /// A published post by slug. Drafts are reported as not found.
    #[instrument(skip(self))]
    pub async fn published_post(&self, slug: &str) -> BlogResult<Post> {
        self.posts_by_slug
            .get_or_fetch(key(&[POST, slug]), || async {
                let query = PostQuery {
                    slug: Some(slug.to_string()),
                    ..PostQuery::published()
                };
                self.db
                    .posts()
                    .list(&query)
                    .await?
                    .into_iter()
                    .next()
                    .map(flatten)
                    .ok_or_else(|| BlogError::not_found("Post", slug))
            })
            .await
    }

    /// Any post by id, for editing.
    #[instrument(skip(self))]
    pub async fn post(&self, id: &str) -> BlogResult<Post> {
        let nested = self.db.posts().get(id).await?;
        Ok(flatten(nested))
    }

    /// All categories ordered by name.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> BlogResult<Vec<Category>> {
        self.category_lists
            .get_or_fetch(key(&[CATEGORIES]), || async {
                Ok::<_, BlogError>(self.db.categories().list().await?)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn category(&self, id: &str) -> BlogResult<Category> {
        Ok(self.db.categories().get(id).await?)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create (`id == None`) or update a post and replace its categories.
    ///
    /// Input is validated before the store is touched.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn save_post(&self, id: Option<&str>, input: &PostInput) -> BlogResult<Post> {
        let valid = input.validate()?;
        let category_ids = valid.category_ids.clone();
        let now = current_timestamp();
        let posts = self.db.posts();

        let saved = match id {
            Some(id) => {
                let existing = posts.get_record(id).await?;
                let published_at = resolve_published_at(Some(&existing), valid.published, &now);
                let record = to_record(id, valid, published_at, &existing.created_at);
                posts.update(&record, &category_ids).await?
            }
            None => {
                let published_at = resolve_published_at(None, valid.published, &now);
                let record = to_record("", valid, published_at, "");
                posts.create(&record, &category_ids).await?
            }
        };
        debug!(id = %saved.id, slug = %saved.slug, "Saved post");

        self.invalidate_posts();
        self.post(&saved.id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: &str) -> BlogResult<()> {
        self.db.posts().delete(id).await?;
        self.invalidate_posts();
        Ok(())
    }

    /// Create (`id == None`) or update a category.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn save_category(
        &self,
        id: Option<&str>,
        input: &CategoryInput,
    ) -> BlogResult<Category> {
        let valid = input.validate()?;
        let category = Category {
            id: id.unwrap_or_default().to_string(),
            name: valid.name,
            slug: valid.slug,
            description: valid.description,
            color: valid.color,
            created_at: String::new(),
            updated_at: String::new(),
        };

        let repo = self.db.categories();
        let saved = match id {
            Some(_) => repo.update(&category).await?,
            None => repo.create(&category).await?,
        };

        self.invalidate_categories();
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &str) -> BlogResult<()> {
        self.db.categories().delete(id).await?;
        self.invalidate_categories();
        Ok(())
    }

    /// Run the one-time seed and drop every cached query.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> SeedReport {
        let report = seed_database(&self.db).await;
        if report.success {
            self.invalidate_categories();
        }
        report
    }

    // =========================================================================
    // Cache invalidation
    // =========================================================================

    fn invalidate_posts(&self) {
        self.post_lists.invalidate(&[POSTS]);
        self.post_lists.invalidate(&[DASHBOARD_POSTS]);
        self.posts_by_slug.invalidate(&[POST]);
    }

    /// Posts embed their categories, so category changes stale post reads too.
    fn invalidate_categories(&self) {
        self.category_lists.invalidate(&[CATEGORIES]);
        self.invalidate_posts();
    }
}
