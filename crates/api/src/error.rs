use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use presurvey_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `presurvey_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The survey page template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidInput { .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", core.to_string())
                }
                // The respondent sees the underlying failure so they know
                // the answers were not saved.
                CoreError::Append(_) => {
                    (StatusCode::BAD_GATEWAY, "APPEND_FAILED", core.to_string())
                }
            },

            // --- Rendering errors ---
            AppError::Template(err) => {
                tracing::error!(error = %err, "Template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoreError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn core_errors_map_to_client_and_gateway_statuses() {
        assert_eq!(
            status_of(CoreError::InvalidInput {
                field: "q1_score",
                reason: "must be between 1 and 10, got 0".into(),
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::Append("quota exceeded".into())),
            StatusCode::BAD_GATEWAY
        );
    }
}
