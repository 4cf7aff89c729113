use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::warn;
use uuid::Uuid;

use sahayata_db::StoreError;
use sahayata_db::models::{ReliefRequestRow, parse_timestamp};
use sahayata_types::api::{Claims, SubmitReliefRequest, UpdateReliefRequest};
use sahayata_types::models::{DisasterType, Priority, ReliefRequest, ReliefType, Status};
use sahayata_types::validate::{validate_new_request, validate_update};

use crate::auth::AppStateInner;
use crate::error::ApiError;

/// Citizen submission. The returned id doubles as the public tracking
/// token.
pub async fn submit(
    State(state): State<Arc<AppStateInner>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitReliefRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_new_request(&req).map_err(ApiError::Validation)?;

    let request_id = Uuid::new_v4();

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let rid = request_id.to_string();
    let citizen_id = claims.sub.to_string();
    let row = tokio::task::spawn_blocking(move || {
        db.db.insert_request(&rid, &citizen_id, &req)?;
        db.db
            .get_request(&rid)?
            .ok_or(StoreError::NotFound("relief request"))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(request_from_row(row))))
}

/// Public tracking lookup; the unguessable id is the only credential.
pub async fn track(
    State(state): State<Arc<AppStateInner>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReliefRequest>, ApiError> {
    let db = state.clone();
    let rid = id.to_string();
    let row = tokio::task::spawn_blocking(move || db.db.get_request(&rid))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??
        .ok_or(StoreError::NotFound("relief request"))?;

    Ok(Json(request_from_row(row)))
}

/// The caller's own submissions, newest first. Ownership comes from the
/// session, not from a request parameter.
pub async fn list_mine(
    State(state): State<Arc<AppStateInner>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let citizen_id = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_requests_for_citizen(&citizen_id))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    let requests: Vec<ReliefRequest> = rows.into_iter().map(request_from_row).collect();
    Ok(Json(requests))
}

pub async fn list_all(
    State(state): State<Arc<AppStateInner>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let requester = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_all_requests(&requester))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    let requests: Vec<ReliefRequest> = rows.into_iter().map(request_from_row).collect();
    Ok(Json(requests))
}

pub async fn update(
    State(state): State<Arc<AppStateInner>>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(patch): Json<UpdateReliefRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_update(&patch).map_err(ApiError::Validation)?;

    let db = state.clone();
    let rid = id.to_string();
    let requester = claims.sub.to_string();
    let row = tokio::task::spawn_blocking(move || db.db.update_request(&rid, &requester, &patch))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    Ok(Json(request_from_row(row)))
}

pub async fn stats(
    State(state): State<Arc<AppStateInner>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let requester = claims.sub.to_string();
    let stats = tokio::task::spawn_blocking(move || db.db.request_stats(&requester))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    Ok(Json(stats))
}

fn request_from_row(row: ReliefRequestRow) -> ReliefRequest {
    ReliefRequest {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt request id '{}': {}", row.id, e);
            Uuid::default()
        }),
        citizen_id: row.citizen_id.parse().unwrap_or_else(|e| {
            warn!("Corrupt citizen_id on request '{}': {}", row.id, e);
            Uuid::default()
        }),
        disaster_type: row.disaster_type.parse().unwrap_or_else(|e| {
            warn!("Corrupt disaster_type on request '{}': {}", row.id, e);
            DisasterType::Flood
        }),
        relief_type: row.relief_type.parse().unwrap_or_else(|e| {
            warn!("Corrupt relief_type on request '{}': {}", row.id, e);
            ReliefType::Food
        }),
        priority: row.priority.parse().unwrap_or_else(|e| {
            warn!("Corrupt priority on request '{}': {}", row.id, e);
            Priority::Low
        }),
        status: row.status.parse().unwrap_or_else(|e| {
            warn!("Corrupt status on request '{}': {}", row.id, e);
            Status::Pending
        }),
        created_at: parse_timestamp(&row.created_at),
        updated_at: parse_timestamp(&row.updated_at),
        citizen_name: row.citizen_name,
        ward_number: row.ward_number,
        location_details: row.location_details,
        damage_description: row.damage_description,
        assigned_team: row.assigned_team,
        admin_remark: row.admin_remark,
    }
}
