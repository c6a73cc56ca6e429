use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::path::Path;

use super::types::AppState;

/// Serves the browser shell. Known files come straight from the public
/// directory; anything else falls back to index.html so client-side routes
/// survive a reload. GET only; the shell is never a mutation target.
pub async fn spa_fallback(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }
    let rel = uri.path().trim_start_matches('/');
    if rel.split('/').any(|seg| seg == "..") {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }

    let candidate = if rel.is_empty() {
        state.public_dir.join("index.html")
    } else {
        state.public_dir.join(rel)
    };
    if let Ok(bytes) = tokio::fs::read(&candidate).await {
        return file_response(&candidate, bytes);
    }

    let shell = state.public_dir.join("index.html");
    match tokio::fs::read(&shell).await {
        Ok(bytes) => file_response(&shell, bytes),
        Err(_) => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

fn file_response(path: &Path, bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, content_type(path))], bytes).into_response()
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
