use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::helpers;
use crate::api::types::AppState;
use crate::records::RecordKind;
use crate::store;

// The browser sends `id` as a number or a numeric string, and `completed` as
// a boolean or 0/1, depending on which control fired the request.

fn record_id(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn completed_flag(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

fn kind_from_table(table: &str) -> Result<RecordKind, ApiError> {
    RecordKind::from_table(table)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid table: {}", table)))
}

pub async fn mark_complete(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    helpers::require_admin(&state, &headers)?;
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    let table = body
        .get("table")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::BadRequest("missing table".to_string()))?;
    let kind = kind_from_table(table)?;
    let id = body
        .get("id")
        .and_then(record_id)
        .ok_or_else(|| ApiError::BadRequest("missing id".to_string()))?;
    let completed = body
        .get("completed")
        .and_then(completed_flag)
        .ok_or_else(|| ApiError::BadRequest("missing completed".to_string()))?;

    let conn = state.db();
    if !store::set_completed(&conn, kind, id, completed)? {
        return Err(ApiError::NotFound);
    }
    info!(table = kind.table(), id, completed, "completion toggled");
    Ok(Json(json!({ "ok": true })))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    helpers::require_admin(&state, &headers)?;
    let kind = kind_from_table(&table)?;
    let id = helpers::parse_id(&id)?;

    let conn = state.db();
    if !store::delete(&conn, kind, id)? {
        return Err(ApiError::NotFound);
    }
    info!(table = kind.table(), id, "record deleted");
    Ok(Json(json!({ "ok": true })))
}

pub async fn log_list(
    State(state): State<AppState>,
    Path(table): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    helpers::require_admin(&state, &headers)?;
    let kind = kind_from_table(&table)?;

    let conn = state.db();
    let resp = match kind {
        RecordKind::BusSubs => Json(store::list_completed_subs(&conn)?).into_response(),
        RecordKind::BusRepairs => Json(store::list_completed_repairs(&conn)?).into_response(),
        RecordKind::FieldTrips => Json(store::list_completed_trips(&conn)?).into_response(),
    };
    Ok(resp)
}
