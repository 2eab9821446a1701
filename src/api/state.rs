//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` so tests can inject an in-memory database.
/// The handle is created once at startup and shared by every request.
pub struct AppState<D: Database> {
    db: Arc<D>,
    docs_enabled: bool,
}

// Manual Clone impl - only the Arc needs to be cloneable, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            docs_enabled: self.docs_enabled,
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState with the given database.
    pub fn new(db: D) -> Self {
        Self {
            db: Arc::new(db),
            docs_enabled: false,
        }
    }

    /// Record whether the OpenAPI UI is mounted at `/docs`.
    pub fn with_docs(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    pub fn docs_enabled(&self) -> bool {
        self.docs_enabled
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a cloned Arc to the database.
    ///
    /// Useful for passing the database to services that need Arc<D>.
    pub fn db_arc(&self) -> Arc<D> {
        Arc::clone(&self.db)
    }
}
