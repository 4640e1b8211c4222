//! Error types for the admin web interface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use outreach::OutreachError;
use thiserror::Error;

/// Errors that can occur in the admin web interface.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Pipeline error.
    #[error(transparent)]
    Outreach(#[from] OutreachError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),
}

impl AdminError {
    fn status(&self) -> StatusCode {
        match self {
            AdminError::Outreach(OutreachError::Validation(_)) => StatusCode::BAD_REQUEST,
            AdminError::Outreach(OutreachError::Auth(_))
            | AdminError::Outreach(OutreachError::Upstream(_))
            | AdminError::Outreach(OutreachError::Dispatch { .. }) => StatusCode::BAD_GATEWAY,
            AdminError::Database(database::DatabaseError::UnknownScope(_)) => StatusCode::BAD_REQUEST,
            AdminError::Outreach(OutreachError::Config(_)) | AdminError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;
    use outreach::ValidationError;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AdminError::from(OutreachError::from(ValidationError::EmptyMessage));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejected_dispatch_maps_to_bad_gateway() {
        let err = AdminError::from(OutreachError::Dispatch {
            status: 400,
            message: "quota".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unknown_scope_maps_to_bad_request() {
        let err = AdminError::from(database::DatabaseError::UnknownScope("x".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
