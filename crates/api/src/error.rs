use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use curator_core::error::CoreError;
use curator_core::workflow::WorkflowError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{"error": ..., "code": ...}`
/// bodies. Messages are fixed per kind; collaborator error text is logged,
/// never returned.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A moderation workflow failure.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Request body failed `validator` rules.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Unauthorized(reason) => {
                    tracing::debug!(reason = %reason, "Rejected unauthenticated request");
                    (
                        StatusCode::UNAUTHORIZED,
                        "UNAUTHORIZED",
                        "Unauthorized".to_string(),
                    )
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            AppError::Workflow(err) => {
                if err.leaves_partial_state() {
                    tracing::error!(
                        error = %err,
                        code = err.code(),
                        "Request failed after a partial write; stores need reconciliation"
                    );
                }
                (workflow_status(err), err.code(), err.public_message())
            }

            AppError::InvalidInput(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),

            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// HTTP status for each workflow failure kind.
///
/// A double review is the client's mistake, so it is a 400 rather than a
/// 409. Collaborator failures are all 500.
pub fn workflow_status(err: &WorkflowError) -> StatusCode {
    match err {
        WorkflowError::Validation(_) | WorkflowError::AlreadyReviewed { .. } => {
            StatusCode::BAD_REQUEST
        }
        WorkflowError::Unauthorized => StatusCode::UNAUTHORIZED,
        WorkflowError::NotFound { .. } => StatusCode::NOT_FOUND,
        WorkflowError::RoleLookup { .. }
        | WorkflowError::Fetch { .. }
        | WorkflowError::Create { .. }
        | WorkflowError::ApplyChanges { .. }
        | WorkflowError::StatusUpdate { .. }
        | WorkflowError::UnsupportedEntityType(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_` constraints map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
