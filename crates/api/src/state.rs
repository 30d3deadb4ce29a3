//! Application state shared across handlers.

use database::Database;

use crate::journal::Journal;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Journal operations.
    pub journal: Journal,
    /// Expected identity webhook secret, if any.
    pub webhook_secret: Option<String>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, webhook_secret: Option<String>) -> Self {
        Self {
            journal: Journal::new(db.clone()),
            db,
            webhook_secret,
        }
    }
}
