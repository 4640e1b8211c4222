//! Error types for the outreach pipeline.

use class_gateway::GatewayError;
use thiserror::Error;

/// Errors surfaced to callers of the pipeline.
///
/// Per-page and per-class upstream failures never show up here: they are
/// logged and degrade to zero results for that unit.
#[derive(Debug, Error)]
pub enum OutreachError {
    /// Caller input rejected before any network call.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Access token could not be obtained. Fatal to the run.
    #[error("token acquisition failed: {0}")]
    Auth(#[source] GatewayError),

    /// Request to the backend failed outside a degradable unit.
    #[error("upstream error: {0}")]
    Upstream(#[source] GatewayError),

    /// The backend refused a broadcast.
    #[error("dispatch rejected (status {status}): {message}")]
    Dispatch { status: i64, message: String },

    /// Teacher configuration could not be read or written.
    #[error("config store error: {0}")]
    Config(#[from] ConfigError),
}

/// Invalid caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one grade must be selected")]
    EmptyGrades,
    #[error("at least one date must be selected")]
    EmptyDates,
    #[error("message text cannot be empty")]
    EmptyMessage,
    #[error("at least one student must be selected")]
    EmptyTargets,
    #[error("teacher id cannot be empty")]
    EmptyTeacher,
}

/// Failure of the configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Database(#[from] database::DatabaseError),
}

/// A structured parameter (`teacher`, `classReq`) whose text could not be decoded.
///
/// Always converted into a logged fallback value, never returned to callers.
#[derive(Debug, Error)]
#[error("cannot decode `{key}`: {source}")]
pub struct ConfigDecodeError {
    pub key: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, OutreachError>;
