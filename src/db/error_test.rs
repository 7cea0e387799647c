//! Tests for database error types.

use crate::db::{DbError, DbResult};

#[test]
fn not_found_error_displays_correctly() {
    let err = DbError::NotFound {
        entity_type: "Post".to_string(),
        id: "abc12345".to_string(),
    };
    assert_eq!(err.to_string(), "Entity not found: Post with id 'abc12345'");
}

#[test]
fn not_found_helper_builds_variant() {
    let err = DbError::not_found("Category", "design");
    assert!(matches!(
        err,
        DbError::NotFound { ref entity_type, ref id } if entity_type == "Category" && id == "design"
    ));
}

#[test]
fn constraint_error_displays_correctly() {
    let err = DbError::Constraint {
        message: "UNIQUE constraint failed: posts.slug".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Constraint violation: UNIQUE constraint failed: posts.slug"
    );
}

#[test]
fn database_error_displays_correctly() {
    let err = DbError::Database {
        message: "disk I/O error".to_string(),
    };
    assert_eq!(err.to_string(), "Database error: disk I/O error");
}

#[test]
fn migration_error_displays_correctly() {
    let err = DbError::Migration {
        message: "failed to apply migration 20250101000000".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Migration error: failed to apply migration 20250101000000"
    );
}

#[test]
fn connection_error_displays_correctly() {
    let err = DbError::Connection {
        message: "unable to open database".to_string(),
    };
    assert_eq!(err.to_string(), "Connection error: unable to open database");
}

#[test]
fn db_result_propagates_with_question_mark() {
    fn inner() -> DbResult<u32> {
        Err(DbError::Validation {
            message: "bad color".to_string(),
        })
    }
    fn outer() -> DbResult<u32> {
        let value = inner()?;
        Ok(value + 1)
    }
    assert!(matches!(outer(), Err(DbError::Validation { .. })));
}

#[test]
fn errors_carry_diagnostic_codes() {
    use miette::Diagnostic;

    let err = DbError::not_found("Post", "x");
    let code = err.code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("blog::db::not_found"));
}
