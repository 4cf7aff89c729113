//! Database row types — these map directly to SQLite rows.
//! Distinct from sahayata-types API models to keep the DB layer independent.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

#[derive(Debug)]
pub struct ProfileRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
    pub created_at: String,
}

#[derive(Debug)]
pub struct ReliefRequestRow {
    pub id: String,
    pub citizen_id: String,
    /// Submitter name from the LEFT JOIN on profiles.
    pub citizen_name: Option<String>,
    pub disaster_type: String,
    pub ward_number: u32,
    pub location_details: String,
    pub damage_description: String,
    pub relief_type: String,
    pub priority: String,
    pub status: String,
    pub assigned_team: Option<String>,
    pub admin_remark: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Timestamps are written as RFC 3339, but SQLite's own datetime('now')
/// default produces "YYYY-MM-DD HH:MM:SS" without a timezone. Accept both.
pub fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            DateTime::default()
        })
}
