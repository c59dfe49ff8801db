use auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps service errors onto HTTP statuses. Anything outside the deliberate
/// taxonomy becomes an opaque 500; the real cause goes to the log, not to
/// the client.
pub struct ApiError(AuthError);

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AuthError::DuplicateEmail | AuthError::DuplicateRole => {
                (StatusCode::CONFLICT, self.0.to_string())
            }
            AuthError::MissingRequiredField => (StatusCode::BAD_REQUEST, self.0.to_string()),
            AuthError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            AuthError::Forbidden(reason) => (StatusCode::FORBIDDEN, reason.clone()),
            error => {
                tracing::error!(%error, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
