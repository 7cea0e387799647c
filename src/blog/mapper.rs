//! Flattening of nested join results into presentation posts.

use crate::db::{Post, PostWithCategories};

/// Flatten post -> post_categories -> categories into a post with an inline
/// category list.
///
/// Join rows whose category did not resolve are skipped. A post without any
/// join rows gets an empty list.
pub fn flatten(nested: PostWithCategories) -> Post {
    let PostWithCategories {
        post,
        post_categories,
    } = nested;

    let categories = post_categories
        .into_iter()
        .filter_map(|link| link.category)
        .collect();

    Post {
        id: post.id,
        title: post.title,
        slug: post.slug,
        content: post.content,
        excerpt: post.excerpt,
        author_name: post.author_name,
        author_avatar: post.author_avatar,
        published: post.published,
        published_at: post.published_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
        categories,
    }
}

/// Flatten every nested post, keeping order.
pub fn flatten_all(nested: Vec<PostWithCategories>) -> Vec<Post> {
    nested.into_iter().map(flatten).collect()
}

/// Keep only the posts filed under `category_id`.
pub fn filter_by_category(posts: Vec<Post>, category_id: &str) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| post.has_category(category_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Category, CategoryLink, PostRecord};

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_uppercase(),
            slug: id.to_string(),
            description: None,
            color: "#6366F1".to_string(),
            created_at: "2025-01-01 00:00:00".to_string(),
            updated_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    fn nested(id: &str, links: Vec<CategoryLink>) -> PostWithCategories {
        PostWithCategories {
            post: PostRecord {
                id: id.to_string(),
                title: format!("Title {id}"),
                slug: id.to_string(),
                content: "body".to_string(),
                excerpt: None,
                author_name: "Lana Steiner".to_string(),
                author_avatar: None,
                published: true,
                published_at: Some("2025-01-18 00:00:00".to_string()),
                created_at: "2025-01-18 00:00:00".to_string(),
                updated_at: "2025-01-18 00:00:00".to_string(),
            },
            post_categories: links,
        }
    }

    fn link(id: &str) -> CategoryLink {
        CategoryLink {
            category_id: id.to_string(),
            category: Some(category(id)),
        }
    }

    #[test]
    fn flatten_without_join_rows_yields_empty_list() {
        let post = flatten(nested("p1", vec![]));
        assert!(post.categories.is_empty());
        assert_eq!(post.title, "Title p1");
    }

    #[test]
    fn flatten_skips_unresolved_categories() {
        let post = flatten(nested(
            "p1",
            vec![
                link("design"),
                CategoryLink {
                    category_id: "gone".to_string(),
                    category: None,
                },
                link("research"),
            ],
        ));
        assert_eq!(post.category_ids(), vec!["design", "research"]);
    }

    #[test]
    fn flatten_keeps_post_fields() {
        let source = nested("p1", vec![link("design")]);
        let record = source.post.clone();
        let post = flatten(source);

        assert_eq!(post.id, record.id);
        assert_eq!(post.slug, record.slug);
        assert_eq!(post.published_at, record.published_at);
        assert_eq!(post.categories, vec![category("design")]);
    }

    #[test]
    fn filter_returns_exactly_matching_posts() {
        let posts = flatten_all(vec![
            nested("a", vec![link("design"), link("research")]),
            nested("b", vec![link("software")]),
            nested("c", vec![]),
            nested("d", vec![link("research")]),
        ]);

        let ids: Vec<String> = filter_by_category(posts, "research")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn filter_with_unknown_category_is_empty() {
        let posts = flatten_all(vec![nested("a", vec![link("design")])]);
        assert!(filter_by_category(posts, "nope").is_empty());
    }
}
