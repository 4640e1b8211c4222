//! Application state shared across handlers.

use database::Database;
use outreach::OutreachPipeline;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Parameter store, for listings the pipeline does not cover.
    pub db: Database,
    /// Outreach pipeline backed by `db`.
    pub pipeline: OutreachPipeline,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, pipeline: OutreachPipeline) -> Self {
        Self { db, pipeline }
    }
}
