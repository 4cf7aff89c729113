use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::warn;
use uuid::Uuid;

use sahayata_db::models::{ProfileRow, parse_timestamp};
use sahayata_types::api::{AdminExistsResponse, Claims};
use sahayata_types::models::{Profile, Role};

use crate::auth::AppStateInner;
use crate::error::ApiError;

/// First-run probe for the setup flow: open to any authenticated caller.
pub async fn admin_exists(
    State(state): State<Arc<AppStateInner>>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let exists = tokio::task::spawn_blocking(move || db.db.admin_exists())
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    Ok(Json(AdminExistsResponse { exists }))
}

pub async fn list_users(
    State(state): State<Arc<AppStateInner>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let requester = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.list_users(&requester))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    let users: Vec<Profile> = rows.into_iter().map(profile_from_row).collect();
    Ok(Json(users))
}

/// Grant the admin role. The requester is always the authenticated caller;
/// the bootstrap and steady-state rules live in the store.
pub async fn promote(
    State(state): State<Arc<AppStateInner>>,
    Path(user_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let target = user_id.to_string();
    let requester = claims.sub.to_string();
    tokio::task::spawn_blocking(move || db.db.promote_user(&target, &requester))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn demote(
    State(state): State<Arc<AppStateInner>>,
    Path(user_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let target = user_id.to_string();
    let requester = claims.sub.to_string();
    tokio::task::spawn_blocking(move || db.db.demote_user(&target, &requester))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))??;

    Ok(Json(serde_json::json!({ "success": true })))
}

pub(crate) fn profile_from_row(row: ProfileRow) -> Profile {
    Profile {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt profile id '{}': {}", row.id, e);
            Uuid::default()
        }),
        role: row.role.parse().unwrap_or_else(|e| {
            warn!("Corrupt role on profile '{}': {}", row.id, e);
            Role::Citizen
        }),
        email: row.email,
        full_name: row.full_name,
        created_at: parse_timestamp(&row.created_at),
    }
}
