use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Role::Citizen),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterType {
    Flood,
    Earthquake,
    Landslide,
    Fire,
}

impl DisasterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Flood => "flood",
            DisasterType::Earthquake => "earthquake",
            DisasterType::Landslide => "landslide",
            DisasterType::Fire => "fire",
        }
    }
}

impl std::str::FromStr for DisasterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flood" => Ok(DisasterType::Flood),
            "earthquake" => Ok(DisasterType::Earthquake),
            "landslide" => Ok(DisasterType::Landslide),
            "fire" => Ok(DisasterType::Fire),
            other => Err(format!("unknown disaster type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliefType {
    Food,
    Medical,
    Shelter,
    Evacuation,
}

impl ReliefType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReliefType::Food => "food",
            ReliefType::Medical => "medical",
            ReliefType::Shelter => "shelter",
            ReliefType::Evacuation => "evacuation",
        }
    }
}

impl std::str::FromStr for ReliefType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(ReliefType::Food),
            "medical" => Ok(ReliefType::Medical),
            "shelter" => Ok(ReliefType::Shelter),
            "evacuation" => Ok(ReliefType::Evacuation),
            other => Err(format!("unknown relief type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Lifecycle state of a relief request. The nominal flow is
/// pending → approved → assigned → resolved, but an admin may set any
/// status from any status; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
    Assigned,
    Resolved,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Assigned => "assigned",
            Status::Resolved => "resolved",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "approved" => Ok(Status::Approved),
            "assigned" => Ok(Status::Assigned),
            "resolved" => Ok(Status::Resolved),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A registered identity. The password hash never leaves the DB layer;
/// this is the outward-facing shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A citizen-submitted incident report. Classification fields are fixed at
/// submission; only `status`, `assigned_team` and `admin_remark` change
/// afterwards, and only through admin updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliefRequest {
    pub id: Uuid,
    pub citizen_id: Uuid,
    /// Submitter display name, present when the row was joined with profiles.
    pub citizen_name: Option<String>,
    pub disaster_type: DisasterType,
    pub ward_number: u32,
    pub location_details: String,
    pub damage_description: String,
    pub relief_type: ReliefType,
    pub priority: Priority,
    pub status: Status,
    pub assigned_team: Option<String>,
    pub admin_remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
