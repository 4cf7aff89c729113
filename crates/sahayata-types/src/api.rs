use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{DisasterType, Priority, ReliefType, Status};

// -- JWT Claims --

/// JWT claims shared between the auth handlers and the REST middleware.
/// Canonical definition lives here in sahayata-types to eliminate
/// duplication. The caller's role is not part of the token; every
/// privileged operation re-reads it from the profiles table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub full_name: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub full_name: String,
    pub token: String,
}

// -- Relief requests --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitReliefRequest {
    pub disaster_type: DisasterType,
    pub ward_number: u32,
    pub location_details: String,
    pub damage_description: String,
    pub relief_type: ReliefType,
    pub priority: Priority,
}

/// Admin patch. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateReliefRequest {
    pub status: Option<Status>,
    pub assigned_team: Option<String>,
    pub admin_remark: Option<String>,
}

// -- Admin --

#[derive(Debug, Serialize)]
pub struct AdminExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DisasterTypeCounts {
    pub flood: usize,
    pub earthquake: usize,
    pub landslide: usize,
    pub fire: usize,
}

/// Aggregate counts over all relief requests. Status buckets sum to total,
/// as do priority buckets and disaster-type buckets.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RequestStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub assigned: usize,
    pub resolved: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub by_disaster_type: DisasterTypeCounts,
}
