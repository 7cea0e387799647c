//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod category;
mod connection;
mod helpers;
mod post;

#[cfg(test)]
mod category_test;
#[cfg(test)]
mod connection_test;

pub use category::SqliteCategoryRepository;
pub use connection::SqliteDatabase;
pub use post::SqlitePostRepository;
