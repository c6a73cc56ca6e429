use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::helpers::{self, SESSION_COOKIE};
use crate::api::types::AppState;

fn session_cookie(value: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, value, max_age_secs
    )
}

fn with_cookie(mut resp: Response, cookie: String) -> Response {
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        resp.headers_mut().insert(header::SET_COOKIE, value);
    }
    resp
}

pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Response, ApiError> {
    let password = body
        .as_ref()
        .and_then(|Json(v)| v.get("password"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if password.is_empty() {
        return Err(ApiError::BadRequest("missing password".to_string()));
    }

    if !state.admin.verify(password)? {
        info!("rejected login attempt");
        return Err(ApiError::Forbidden);
    }

    let id = state.sessions.create();
    info!("admin login");
    let resp = Json(json!({ "ok": true })).into_response();
    Ok(with_cookie(
        resp,
        session_cookie(&id, state.sessions.ttl().as_secs()),
    ))
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = helpers::session_id(&headers) {
        state.sessions.destroy(&id);
        info!("admin logout");
    }
    let resp = Json(json!({ "ok": true })).into_response();
    with_cookie(resp, session_cookie("", 0))
}

pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let is_admin = helpers::session_id(&headers)
        .map(|id| state.sessions.is_admin(&id))
        .unwrap_or(false);
    Json(json!({ "isAdmin": is_admin }))
}
