//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hbnb_domain::error::HbnbError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Build a `{"error": message}` response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Maps [`HbnbError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HbnbError);

impl From<HbnbError> for ApiError {
    fn from(err: HbnbError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            HbnbError::Validation(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
            HbnbError::NotFound(err) => {
                tracing::debug!(%err, "not found");
                error_response(StatusCode::NOT_FOUND, "Not found")
            }
            HbnbError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}
