use axum::http::{header, HeaderMap};

use super::error::ApiError;
use super::types::AppState;

pub const SESSION_COOKIE: &str = "busboard_session";

pub fn session_id(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in raw.split(';') {
        if let Some((name, value)) = part.trim().split_once('=') {
            if name == SESSION_COOKIE {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Gate for every mutating route and the log view. A missing, unknown or
/// expired session all read as "not admin".
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let is_admin = session_id(headers)
        .map(|id| state.sessions.is_admin(&id))
        .unwrap_or(false);
    if is_admin {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid id: {}", raw)))
}
