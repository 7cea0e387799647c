//! Errors surfaced by blog operations.

use miette::Diagnostic;
use thiserror::Error;

use super::validation::ValidationErrors;
use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum BlogError {
    /// Input rejected before any store call.
    #[error("Validation failed: {0}")]
    #[diagnostic(code(blog::validation))]
    Validation(ValidationErrors),

    #[error("{entity} not found: {key}")]
    #[diagnostic(code(blog::not_found))]
    NotFound { entity: String, key: String },

    #[error("Conflict: {message}")]
    #[diagnostic(
        code(blog::conflict),
        help("Choose a different slug or check that every category exists")
    )]
    Conflict { message: String },

    #[error("Backend error: {message}")]
    #[diagnostic(code(blog::backend))]
    Backend { message: String },
}

impl BlogError {
    pub fn not_found(entity: &str, key: &str) -> Self {
        BlogError::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }
}

impl From<ValidationErrors> for BlogError {
    fn from(errors: ValidationErrors) -> Self {
        BlogError::Validation(errors)
    }
}

impl From<DbError> for BlogError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { entity_type, id } => BlogError::NotFound {
                entity: entity_type,
                key: id,
            },
            DbError::Constraint { message } => BlogError::Conflict { message },
            other => BlogError::Backend {
                message: other.to_string(),
            },
        }
    }
}

pub type BlogResult<T> = Result<T, BlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_not_found_maps_to_not_found() {
        let err: BlogError = DbError::not_found("Post", "abc").into();
        assert_eq!(err.to_string(), "Post not found: abc");
    }

    #[test]
    fn db_constraint_maps_to_conflict() {
        let err: BlogError = DbError::Constraint {
            message: "UNIQUE constraint failed: posts.slug".to_string(),
        }
        .into();
        assert!(matches!(err, BlogError::Conflict { .. }));
    }

    #[test]
    fn other_db_errors_keep_their_message() {
        let err: BlogError = DbError::Database {
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Backend error: Database error: disk full");
    }
}
