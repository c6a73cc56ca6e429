use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::helpers;
use crate::api::types::AppState;
use crate::records::{BusRepair, BusRepairFields};
use crate::store;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BusRepair>>, ApiError> {
    let conn = state.db();
    Ok(Json(store::list_active_repairs(&conn)?))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<BusRepairFields>>,
) -> Result<Json<Value>, ApiError> {
    helpers::require_admin(&state, &headers)?;
    let fields = body.map(|Json(f)| f).unwrap_or_default();
    let conn = state.db();
    let id = store::create_repair(&conn, &fields)?;
    info!(id, "created bus repair");
    Ok(Json(json!({ "id": id })))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Option<Json<BusRepairFields>>,
) -> Result<Json<Value>, ApiError> {
    helpers::require_admin(&state, &headers)?;
    let id = helpers::parse_id(&id)?;
    let fields = body.map(|Json(f)| f).unwrap_or_default();
    let conn = state.db();
    if !store::update_repair(&conn, id, &fields)? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "ok": true })))
}
