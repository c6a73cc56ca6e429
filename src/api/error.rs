use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::session::CredentialUnset;

/// Errors surfaced to the HTTP caller. Each maps to one status; nothing is
/// retried or recovered.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid password")]
    Forbidden,

    #[error("no admin password configured on server")]
    Misconfigured,

    #[error("not found")]
    NotFound,

    #[error("server error")]
    Db(#[from] rusqlite::Error),
}

impl From<CredentialUnset> for ApiError {
    fn from(_: CredentialUnset) -> Self {
        ApiError::Misconfigured
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Misconfigured | ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let ApiError::Db(e) = &self {
            // The cause goes to the log, never to the caller.
            tracing::error!(error = %e, "database operation failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
