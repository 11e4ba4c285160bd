//! Typed API error for HTTP handlers.
//!
//! Converts claim failures into `{status: "error", message}` responses with
//! the right status code. Internal variants log the real error server-side
//! and return a static message to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use codex_claim_service::ClaimError;

use crate::response_types::{ClaimResponse, CONNECTION_MESSAGE, UNEXPECTED_MESSAGE};

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: missing fields or undecodable body.
    BadRequest(String),
    /// 500: spreadsheet session could not be opened.
    Unavailable(ClaimError),
    /// 500: failure after the session opened. Details are logged only.
    Internal(ClaimError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unavailable(err) => {
                tracing::error!(error = %err, "sheet connection failed");
                (StatusCode::INTERNAL_SERVER_ERROR, CONNECTION_MESSAGE.to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "error processing claim");
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_MESSAGE.to_owned())
            },
        };
        (status, Json(ClaimResponse::error(message))).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Validation(msg) => Self::BadRequest(msg),
            ClaimError::Connection(_) => Self::Unavailable(err),
            ClaimError::Sheet(_) => Self::Internal(err),
        }
    }
}
