//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(blog::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(
        code(blog::db::constraint),
        help("Slugs must be unique and linked categories must exist")
    )]
    Constraint { message: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(blog::db::validation_error))]
    Validation { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(blog::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(blog::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(blog::db::connection_error))]
    Connection { message: String },
}

impl DbError {
    /// Build a `NotFound` error for the given entity type and key.
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
