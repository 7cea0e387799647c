//! Field-level validation of post and category input.
//!
//! Runs before any store call. Every rule reports under the name of the
//! field it checks so callers can show errors next to the offending input.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::slug::{is_slug, slugify};

const MAX_TITLE_LEN: usize = 200;
const MAX_POST_SLUG_LEN: usize = 200;
const MAX_EXCERPT_LEN: usize = 500;
const MAX_AUTHOR_LEN: usize = 100;
const MAX_NAME_LEN: usize = 100;
const MAX_CATEGORY_SLUG_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All failed rules for one input, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    /// First message reported for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Post form input as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    /// Derived from the title when absent.
    pub slug: Option<String>,
    pub content: String,
    pub excerpt: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub published: bool,
    pub category_ids: Vec<String>,
}

/// Post input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub published: bool,
    /// Deduplicated, submission order kept.
    pub category_ids: Vec<String>,
}

/// Category form input as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    /// Derived from the name when absent.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: String,
}

/// Category input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
}

fn len(value: &str) -> usize {
    value.chars().count()
}

/// Empty optional text is stored as NULL.
fn blank_to_none(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn check_required(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    max: usize,
    required: &str,
    too_long: &str,
) {
    if value.is_empty() {
        errors.push(field, required);
    } else if len(value) > max {
        errors.push(field, too_long);
    }
}

fn check_slug(errors: &mut ValidationErrors, value: &str, max: usize) {
    check_required(
        errors,
        "slug",
        value,
        max,
        "Slug is required",
        "Slug is too long",
    );
    if !value.is_empty() && !is_slug(value) {
        errors.push(
            "slug",
            "Slug may only contain lowercase letters, numbers and single hyphens",
        );
    }
}

/// `^#[0-9A-Fa-f]{6}$`
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl PostInput {
    pub fn validate(&self) -> Result<ValidPost, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        check_required(
            &mut errors,
            "title",
            &self.title,
            MAX_TITLE_LEN,
            "Title is required",
            "Title is too long",
        );

        let slug = self
            .slug
            .clone()
            .unwrap_or_else(|| slugify(&self.title));
        check_slug(&mut errors, &slug, MAX_POST_SLUG_LEN);

        if self.content.is_empty() {
            errors.push("content", "Content is required");
        }

        if self
            .excerpt
            .as_deref()
            .is_some_and(|e| len(e) > MAX_EXCERPT_LEN)
        {
            errors.push("excerpt", "Excerpt is too long");
        }

        check_required(
            &mut errors,
            "author_name",
            &self.author_name,
            MAX_AUTHOR_LEN,
            "Author name is required",
            "Author name is too long",
        );

        let author_avatar = blank_to_none(self.author_avatar.as_deref());
        if author_avatar
            .as_deref()
            .is_some_and(|url| reqwest::Url::parse(url).is_err())
        {
            errors.push("author_avatar", "Must be a valid URL");
        }

        let mut category_ids: Vec<String> = Vec::with_capacity(self.category_ids.len());
        for id in &self.category_ids {
            if !id.is_empty() && !category_ids.contains(id) {
                category_ids.push(id.clone());
            }
        }
        if category_ids.is_empty() {
            errors.push("category_ids", "Select at least one category");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidPost {
            title: self.title.clone(),
            slug,
            content: self.content.clone(),
            excerpt: blank_to_none(self.excerpt.as_deref()),
            author_name: self.author_name.clone(),
            author_avatar,
            published: self.published,
            category_ids,
        })
    }
}

impl CategoryInput {
    pub fn validate(&self) -> Result<ValidCategory, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        check_required(
            &mut errors,
            "name",
            &self.name,
            MAX_NAME_LEN,
            "Name is required",
            "Name is too long",
        );

        let slug = self.slug.clone().unwrap_or_else(|| slugify(&self.name));
        check_slug(&mut errors, &slug, MAX_CATEGORY_SLUG_LEN);

        if self
            .description
            .as_deref()
            .is_some_and(|d| len(d) > MAX_DESCRIPTION_LEN)
        {
            errors.push("description", "Description is too long");
        }

        if !is_hex_color(&self.color) {
            errors.push("color", "Must be a valid hex color");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidCategory {
            name: self.name.clone(),
            slug,
            description: blank_to_none(self.description.as_deref()),
            color: self.color.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_input() -> PostInput {
        PostInput {
            title: "Migrating to Linear 101".to_string(),
            slug: None,
            content: "# Linear".to_string(),
            excerpt: Some(String::new()),
            author_name: "Phoenix Baker".to_string(),
            author_avatar: Some(String::new()),
            published: true,
            category_ids: vec!["design".to_string(), "research".to_string()],
        }
    }

    fn category_input() -> CategoryInput {
        CategoryInput {
            name: "Customer Success".to_string(),
            slug: None,
            description: None,
            color: "#10B981".to_string(),
        }
    }

    #[test]
    fn valid_post_derives_slug_and_blanks_optionals() {
        let valid = post_input().validate().unwrap();
        assert_eq!(valid.slug, "migrating-to-linear-101");
        assert!(valid.excerpt.is_none());
        assert!(valid.author_avatar.is_none());
    }

    #[test]
    fn post_without_categories_is_rejected() {
        let input = PostInput {
            category_ids: vec![],
            ..post_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.fields(), vec!["category_ids"]);
        assert_eq!(
            errors.message_for("category_ids"),
            Some("Select at least one category")
        );
    }

    #[test]
    fn duplicate_category_ids_are_collapsed() {
        let input = PostInput {
            category_ids: vec![
                "design".to_string(),
                "research".to_string(),
                "design".to_string(),
            ],
            ..post_input()
        };
        let valid = input.validate().unwrap();
        assert_eq!(valid.category_ids, vec!["design", "research"]);
    }

    #[test]
    fn post_reports_every_failed_field() {
        let input = PostInput {
            title: String::new(),
            slug: Some("Not A Slug".to_string()),
            content: String::new(),
            excerpt: Some("x".repeat(501)),
            author_name: "y".repeat(101),
            author_avatar: Some("not a url".to_string()),
            published: false,
            category_ids: vec![],
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                "title",
                "slug",
                "content",
                "excerpt",
                "author_name",
                "author_avatar",
                "category_ids"
            ]
        );
        assert_eq!(errors.message_for("title"), Some("Title is required"));
        assert_eq!(errors.message_for("author_name"), Some("Author name is too long"));
    }

    #[test]
    fn title_length_counts_characters() {
        let input = PostInput {
            title: "é".repeat(200),
            slug: Some("accents".to_string()),
            ..post_input()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn avatar_url_is_kept_when_valid() {
        let input = PostInput {
            author_avatar: Some("https://example.com/a.png".to_string()),
            ..post_input()
        };
        assert_eq!(
            input.validate().unwrap().author_avatar.as_deref(),
            Some("https://example.com/a.png")
        );
    }

    #[test]
    fn explicit_empty_slug_is_required_error() {
        let input = PostInput {
            slug: Some(String::new()),
            ..post_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.message_for("slug"), Some("Slug is required"));
    }

    #[test]
    fn explicit_slug_must_be_in_slug_form() {
        for slug in ["Linear 101", "linear--101", "-linear", "linear_101"] {
            let input = PostInput {
                slug: Some(slug.to_string()),
                ..post_input()
            };
            let errors = input.validate().unwrap_err();
            assert_eq!(
                errors.message_for("slug"),
                Some("Slug may only contain lowercase letters, numbers and single hyphens"),
                "accepted {slug:?}"
            );
        }

        let input = PostInput {
            slug: Some("linear-101".to_string()),
            ..post_input()
        };
        assert_eq!(input.validate().unwrap().slug, "linear-101");
    }

    #[test]
    fn valid_category_derives_slug() {
        let valid = category_input().validate().unwrap();
        assert_eq!(valid.slug, "customer-success");
        assert_eq!(valid.color, "#10B981");
    }

    #[test]
    fn category_rejects_bad_color() {
        for color in ["10B981", "#10B98", "#10B9811", "#GGGGGG", ""] {
            let input = CategoryInput {
                color: color.to_string(),
                ..category_input()
            };
            let errors = input.validate().unwrap_err();
            assert_eq!(
                errors.message_for("color"),
                Some("Must be a valid hex color"),
                "color {color:?}"
            );
        }
    }

    #[test]
    fn category_name_limits() {
        let input = CategoryInput {
            name: "n".repeat(101),
            slug: Some("n".to_string()),
            description: Some("d".repeat(501)),
            ..category_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.fields(), vec!["name", "description"]);
    }

    #[test]
    fn display_joins_field_messages() {
        let errors = CategoryInput {
            name: String::new(),
            slug: Some("x".to_string()),
            description: None,
            color: "red".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            errors.to_string(),
            "name: Name is required; color: Must be a valid hex color"
        );
    }
}
