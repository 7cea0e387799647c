//! Application state for the API server.

use std::sync::Arc;

use crate::blog::BlogService;
use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` so tests can run against an in-memory store.
/// The service (and its query cache) is shared by every request.
pub struct AppState<D: Database> {
    service: Arc<BlogService<D>>,
}

// Manual Clone impl - only the Arc is cloned, D need not be Clone.
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<D: Database> AppState<D> {
    pub fn new(db: D) -> Self {
        Self {
            service: Arc::new(BlogService::new(db)),
        }
    }

    /// Get a reference to the blog service.
    pub fn service(&self) -> &BlogService<D> {
        &self.service
    }
}
