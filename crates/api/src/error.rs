//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reserva_domain::ReservaError;

/// Wrapper turning domain errors into HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub ReservaError);

impl From<ReservaError> for ApiError {
    fn from(value: ReservaError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ReservaError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ReservaError::Conflict(_) => StatusCode::CONFLICT,
            ReservaError::NotFound(_) => StatusCode::NOT_FOUND,
            ReservaError::NoCredentials(_) | ReservaError::RefreshFailed(_) => {
                StatusCode::UNAUTHORIZED
            }
            ReservaError::Network(_) => StatusCode::BAD_GATEWAY,
            ReservaError::Sync(_)
            | ReservaError::Database(_)
            | ReservaError::Config(_)
            | ReservaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self.0)).into_response()
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
