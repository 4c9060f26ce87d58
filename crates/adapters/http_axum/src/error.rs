//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use purgehub_domain::error::{AuthError, ProviderError, PurgeHubError, ValidationError};
use purgehub_domain::reply::ActionReply;

/// Maps [`PurgeHubError`] to an HTTP response with appropriate status code
/// and an `{success: false, message}` body.
#[derive(Debug)]
pub struct ApiError(PurgeHubError);

impl From<PurgeHubError> for ApiError {
    fn from(err: PurgeHubError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ValidationError::MalformedBody(rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PurgeHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PurgeHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            PurgeHubError::Auth(AuthError::Hashing(err)) => {
                tracing::error!(error = %err, "password hashing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            PurgeHubError::Auth(err) => (StatusCode::UNAUTHORIZED, err.to_string()),
            PurgeHubError::Provider(err @ ProviderError::Rejected { .. }) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            PurgeHubError::Provider(err @ ProviderError::Transport(_)) => {
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            PurgeHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ActionReply::failure(message))).into_response()
    }
}
