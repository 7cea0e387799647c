//! One-time bootstrap of sample categories and posts.
//!
//! Runs only against an empty categories table. Categories go in first, then
//! posts, then the join rows derived by matching slugs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::db::{
    Category, CategoryRepository, Database, DbResult, PostCategoryRow, PostRecord, PostRepository,
};

pub const ALREADY_SEEDED: &str = "Database already seeded";

/// Outcome of a seed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub success: bool,
    pub message: String,
    pub categories_inserted: usize,
    pub posts_inserted: usize,
    pub links_inserted: usize,
}

impl SeedReport {
    fn already_seeded() -> Self {
        Self {
            success: true,
            message: ALREADY_SEEDED.to_string(),
            categories_inserted: 0,
            posts_inserted: 0,
            links_inserted: 0,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            categories_inserted: 0,
            posts_inserted: 0,
            links_inserted: 0,
        }
    }
}

pub struct SeedCategory {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

pub struct SeedPost {
    pub title: &'static str,
    pub slug: &'static str,
    pub excerpt: &'static str,
    pub content: &'static str,
    pub author_name: &'static str,
    pub published_at: &'static str,
    pub category_slugs: &'static [&'static str],
}

pub const SEED_CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "Design",
        slug: "design",
        description: "UI/UX design, visual design, and design thinking",
        color: "#EC4899",
    },
    SeedCategory {
        name: "Research",
        slug: "research",
        description: "Research methodologies and insights",
        color: "#8B5CF6",
    },
    SeedCategory {
        name: "Presentation",
        slug: "presentation",
        description: "Presentation skills and techniques",
        color: "#F59E0B",
    },
    SeedCategory {
        name: "Software",
        slug: "software",
        description: "Software development and engineering",
        color: "#3B82F6",
    },
    SeedCategory {
        name: "Product",
        slug: "product",
        description: "Product management and strategy",
        color: "#10B981",
    },
    SeedCategory {
        name: "Frameworks",
        slug: "frameworks",
        description: "Development frameworks and tools",
        color: "#EF4444",
    },
    SeedCategory {
        name: "Leadership",
        slug: "leadership",
        description: "Leadership and management principles",
        color: "#6366F1",
    },
    SeedCategory {
        name: "Management",
        slug: "management",
        description: "Team and project management",
        color: "#14B8A6",
    },
    SeedCategory {
        name: "Tools",
        slug: "tools",
        description: "Software tools and utilities",
        color: "#F59E0B",
    },
    SeedCategory {
        name: "SaaS",
        slug: "saas",
        description: "Software as a Service products",
        color: "#EC4899",
    },
    SeedCategory {
        name: "Podcasts",
        slug: "podcasts",
        description: "Podcast content and discussions",
        color: "#8B5CF6",
    },
    SeedCategory {
        name: "Customer Success",
        slug: "customer-success",
        description: "Customer success strategies",
        color: "#10B981",
    },
];

pub const SEED_POSTS: &[SeedPost] = &[
    SeedPost {
        title: "UX review presentations",
        slug: "ux-review-presentations",
        excerpt: "How do you create compelling presentations that wow your colleagues and impress your managers?",
        content: include_str!("../../data/seed/ux-review-presentations.md"),
        author_name: "Olivia Rhye",
        published_at: "2025-01-20 00:00:00",
        category_slugs: &["design", "research", "presentation"],
    },
    SeedPost {
        title: "Migrating to Linear 101",
        slug: "migrating-to-linear-101",
        excerpt: "Linear helps streamline software projects, sprints, tasks, and bug tracking...",
        content: include_str!("../../data/seed/migrating-to-linear-101.md"),
        author_name: "Phoenix Baker",
        published_at: "2025-01-19 00:00:00",
        category_slugs: &["design", "research"],
    },
    SeedPost {
        title: "Building your API stack",
        slug: "building-your-api-stack",
        excerpt: "The rise of RESTful APIs has been met by a rise in tools for creating, testing, and managing them...",
        content: include_str!("../../data/seed/building-your-api-stack.md"),
        author_name: "Lana Steiner",
        published_at: "2025-01-18 00:00:00",
        category_slugs: &["software", "research"],
    },
    SeedPost {
        title: "Bill Walsh leadership lessons",
        slug: "bill-walsh-leadership-lessons",
        excerpt: "Like to know the secrets of transforming a 2-14 team into a 3x Super Bowl winning Dynasty?",
        content: include_str!("../../data/seed/bill-walsh-leadership-lessons.md"),
        author_name: "Alec Whitten",
        published_at: "2025-01-17 00:00:00",
        category_slugs: &["leadership", "management"],
    },
    SeedPost {
        title: "PM mental models",
        slug: "pm-mental-models",
        excerpt: "Mental models are simple expressions of complex processes or relationships.",
        content: include_str!("../../data/seed/pm-mental-models.md"),
        author_name: "Demi Wilkinson",
        published_at: "2025-01-16 00:00:00",
        category_slugs: &["product", "research", "frameworks"],
    },
    SeedPost {
        title: "What is wireframing?",
        slug: "what-is-wireframing",
        excerpt: "Introduction to Wireframing and its Principles. Learn from the best in the industry.",
        content: include_str!("../../data/seed/what-is-wireframing.md"),
        author_name: "Candice Wu",
        published_at: "2025-01-15 00:00:00",
        category_slugs: &["design", "research"],
    },
];

/// Pair each post id with its category ids by slug. Pairs whose post or
/// category slug did not resolve to an inserted id are skipped.
pub fn derive_links(
    posts: &[SeedPost],
    post_ids: &HashMap<String, String>,
    category_ids: &HashMap<String, String>,
) -> Vec<PostCategoryRow> {
    posts
        .iter()
        .filter_map(|post| post_ids.get(post.slug).map(|id| (id, post)))
        .flat_map(|(post_id, post)| {
            post.category_slugs.iter().filter_map(move |slug| {
                category_ids.get(*slug).map(|category_id| PostCategoryRow {
                    post_id: post_id.clone(),
                    category_id: category_id.clone(),
                })
            })
        })
        .collect()
}

/// Seed the database unless it already holds categories.
#[instrument(skip(db))]
pub async fn seed_database<D: Database>(db: &D) -> SeedReport {
    match db.categories().count().await {
        Ok(0) => {}
        Ok(existing) => {
            info!(existing, "Skipping seed, categories present");
            return SeedReport::already_seeded();
        }
        Err(e) => return SeedReport::failed(e.to_string()),
    }

    match insert_seed_data(db).await {
        Ok(report) => {
            info!(
                categories = report.categories_inserted,
                posts = report.posts_inserted,
                links = report.links_inserted,
                "Seeded database"
            );
            report
        }
        Err(e) => {
            warn!(error = %e, "Seeding failed");
            SeedReport::failed(e.to_string())
        }
    }
}

async fn insert_seed_data<D: Database>(db: &D) -> DbResult<SeedReport> {
    let categories = db.categories();
    let mut category_ids = HashMap::new();
    for seed in SEED_CATEGORIES {
        let created = categories
            .create(&Category {
                id: String::new(),
                name: seed.name.to_string(),
                slug: seed.slug.to_string(),
                description: Some(seed.description.to_string()),
                color: seed.color.to_string(),
                created_at: String::new(),
                updated_at: String::new(),
            })
            .await?;
        category_ids.insert(created.slug, created.id);
    }

    let posts = db.posts();
    let mut post_ids = HashMap::new();
    for seed in SEED_POSTS {
        let created = posts
            .create(
                &PostRecord {
                    id: String::new(),
                    title: seed.title.to_string(),
                    slug: seed.slug.to_string(),
                    content: seed.content.to_string(),
                    excerpt: Some(seed.excerpt.to_string()),
                    author_name: seed.author_name.to_string(),
                    author_avatar: None,
                    published: true,
                    published_at: Some(seed.published_at.to_string()),
                    created_at: seed.published_at.to_string(),
                    updated_at: seed.published_at.to_string(),
                },
                &[],
            )
            .await?;
        post_ids.insert(created.slug, created.id);
    }

    let links = derive_links(SEED_POSTS, &post_ids, &category_ids);
    let links_inserted = posts.link_categories(&links).await?;

    Ok(SeedReport {
        success: true,
        message: format!(
            "Successfully seeded database with {} categories and {} posts",
            category_ids.len(),
            post_ids.len()
        ),
        categories_inserted: category_ids.len(),
        posts_inserted: post_ids.len(),
        links_inserted,
    })
}
