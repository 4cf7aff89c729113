use chrono::Utc;
use rusqlite::Connection;
use tracing::warn;

use sahayata_types::api::{RequestStats, SubmitReliefRequest, UpdateReliefRequest};

use crate::Database;
use crate::error::StoreError;
use crate::models::{ProfileRow, ReliefRequestRow};

impl Database {
    // -- Profiles --

    pub fn create_profile(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
        full_name: &str,
    ) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO profiles (id, email, password, full_name, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, 'citizen', ?5)",
                rusqlite::params![id, email, password_hash, full_name, now],
            )?;
            Ok(())
        })
    }

    pub fn get_profile_by_email(&self, email: &str) -> Result<Option<ProfileRow>, StoreError> {
        self.with_conn(|conn| query_profile_by_email(conn, email))
    }

    pub fn get_profile_by_id(&self, id: &str) -> Result<Option<ProfileRow>, StoreError> {
        self.with_conn(|conn| query_profile_by_id(conn, id))
    }

    // -- Role governor --

    /// True iff at least one profile currently holds the admin role.
    /// Always recomputed from the table, never cached.
    pub fn admin_exists(&self) -> Result<bool, StoreError> {
        self.with_conn(|conn| Ok(query_admin_count(conn)? > 0))
    }

    /// Grant the admin role to `target_id`.
    ///
    /// While no admin exists, a caller may only promote themselves (the
    /// first-admin bootstrap); once one exists, only a current admin may
    /// promote. The existence check, role check and write share one
    /// transaction behind the connection lock, so concurrent calls
    /// serialize and the second bootstrap attempt lands in the
    /// steady-state branch.
    pub fn promote_user(&self, target_id: &str, requester_id: &str) -> Result<(), StoreError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            if query_admin_count(&tx)? > 0 {
                require_admin(&tx, requester_id)?;
            } else if target_id != requester_id {
                return Err(StoreError::Forbidden(
                    "bootstrap may only promote the requesting user",
                ));
            }

            let changed = tx.execute(
                "UPDATE profiles SET role = 'admin' WHERE id = ?1",
                [target_id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("target user"));
            }

            tx.commit()?;
            Ok(())
        })
    }

    /// Revoke the admin role from `target_id`. Refused when it would leave
    /// the system with zero admins.
    pub fn demote_user(&self, target_id: &str, requester_id: &str) -> Result<(), StoreError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            require_admin(&tx, requester_id)?;
            if query_admin_count(&tx)? <= 1 {
                return Err(StoreError::LastAdminProtected);
            }

            let changed = tx.execute(
                "UPDATE profiles SET role = 'citizen' WHERE id = ?1",
                [target_id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("target user"));
            }

            tx.commit()?;
            Ok(())
        })
    }

    pub fn list_users(&self, requester_id: &str) -> Result<Vec<ProfileRow>, StoreError> {
        self.with_conn(|conn| {
            require_admin(conn, requester_id)?;
            query_all_profiles(conn)
        })
    }

    // -- Relief requests --

    pub fn insert_request(
        &self,
        id: &str,
        citizen_id: &str,
        fields: &SubmitReliefRequest,
    ) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO relief_requests
                     (id, citizen_id, disaster_type, ward_number, location_details,
                      damage_description, relief_type, priority, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'pending', ?9, ?9)",
                rusqlite::params![
                    id,
                    citizen_id,
                    fields.disaster_type.as_str(),
                    fields.ward_number,
                    fields.location_details,
                    fields.damage_description,
                    fields.relief_type.as_str(),
                    fields.priority.as_str(),
                    now,
                ],
            )?;
            Ok(())
        })
    }

    /// Lookup by tracking token. No authorization at this layer; the id is
    /// an unguessable UUID shown only to the submitter.
    pub fn get_request(&self, id: &str) -> Result<Option<ReliefRequestRow>, StoreError> {
        self.with_conn(|conn| query_request_by_id(conn, id))
    }

    pub fn list_requests_for_citizen(
        &self,
        citizen_id: &str,
    ) -> Result<Vec<ReliefRequestRow>, StoreError> {
        self.with_conn(|conn| query_requests_for_citizen(conn, citizen_id))
    }

    pub fn list_all_requests(&self, requester_id: &str) -> Result<Vec<ReliefRequestRow>, StoreError> {
        self.with_conn(|conn| {
            require_admin(conn, requester_id)?;
            query_all_requests(conn)
        })
    }

    /// Apply an admin patch. Only provided fields change; `updated_at` is
    /// always bumped. The role lookup runs in the same transaction as the
    /// write, so a stale client-side role can never sneak an update through.
    pub fn update_request(
        &self,
        id: &str,
        requester_id: &str,
        patch: &UpdateReliefRequest,
    ) -> Result<ReliefRequestRow, StoreError> {
        let now = Utc::now().to_rfc3339();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            require_admin(&tx, requester_id)?;

            let changed = tx.execute(
                "UPDATE relief_requests
                 SET status = COALESCE(?1, status),
                     assigned_team = COALESCE(?2, assigned_team),
                     admin_remark = COALESCE(?3, admin_remark),
                     updated_at = ?4
                 WHERE id = ?5",
                rusqlite::params![
                    patch.status.map(|s| s.as_str()),
                    patch.assigned_team.as_deref(),
                    patch.admin_remark.as_deref(),
                    now,
                    id,
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("relief request"));
            }

            let row = query_request_by_id(&tx, id)?.ok_or(StoreError::NotFound("relief request"))?;
            tx.commit()?;
            Ok(row)
        })
    }

    /// One O(n) pass over the table: total plus the four status, priority
    /// and disaster-type buckets.
    pub fn request_stats(&self, requester_id: &str) -> Result<RequestStats, StoreError> {
        self.with_conn(|conn| {
            require_admin(conn, requester_id)?;
            query_stats(conn)
        })
    }
}

/// Role lookup for privileged operations. The caller's role always comes
/// from the table here, never from a client-supplied claim.
fn require_admin(conn: &Connection, requester_id: &str) -> Result<(), StoreError> {
    let role: Option<String> = conn
        .query_row(
            "SELECT role FROM profiles WHERE id = ?1",
            [requester_id],
            |row| row.get(0),
        )
        .optional()?;

    match role.as_deref() {
        None => Err(StoreError::NotFound("requesting user")),
        Some("admin") => Ok(()),
        Some(_) => Err(StoreError::Forbidden("admin role required")),
    }
}

fn query_admin_count(conn: &Connection) -> Result<u32, StoreError> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM profiles WHERE role = 'admin'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn query_profile_by_email(conn: &Connection, email: &str) -> Result<Option<ProfileRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password, full_name, role, created_at
         FROM profiles WHERE email = ?1",
    )?;

    let row = stmt.query_row([email], map_profile_row).optional()?;
    Ok(row)
}

fn query_profile_by_id(conn: &Connection, id: &str) -> Result<Option<ProfileRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password, full_name, role, created_at
         FROM profiles WHERE id = ?1",
    )?;

    let row = stmt.query_row([id], map_profile_row).optional()?;
    Ok(row)
}

fn query_all_profiles(conn: &Connection) -> Result<Vec<ProfileRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password, full_name, role, created_at
         FROM profiles
         ORDER BY created_at DESC",
    )?;

    let rows = stmt
        .query_map([], map_profile_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_profile_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProfileRow> {
    Ok(ProfileRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        full_name: row.get(3)?,
        role: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn query_request_by_id(conn: &Connection, id: &str) -> Result<Option<ReliefRequestRow>, StoreError> {
    // JOIN profiles to fetch the submitter name in a single query
    let mut stmt = conn.prepare(
        "SELECT r.id, r.citizen_id, p.full_name, r.disaster_type, r.ward_number,
                r.location_details, r.damage_description, r.relief_type, r.priority,
                r.status, r.assigned_team, r.admin_remark, r.created_at, r.updated_at
         FROM relief_requests r
         LEFT JOIN profiles p ON r.citizen_id = p.id
         WHERE r.id = ?1",
    )?;

    let row = stmt.query_row([id], map_request_row).optional()?;
    Ok(row)
}

fn query_requests_for_citizen(
    conn: &Connection,
    citizen_id: &str,
) -> Result<Vec<ReliefRequestRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.citizen_id, p.full_name, r.disaster_type, r.ward_number,
                r.location_details, r.damage_description, r.relief_type, r.priority,
                r.status, r.assigned_team, r.admin_remark, r.created_at, r.updated_at
         FROM relief_requests r
         LEFT JOIN profiles p ON r.citizen_id = p.id
         WHERE r.citizen_id = ?1
         ORDER BY r.created_at DESC",
    )?;

    let rows = stmt
        .query_map([citizen_id], map_request_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_all_requests(conn: &Connection) -> Result<Vec<ReliefRequestRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.citizen_id, p.full_name, r.disaster_type, r.ward_number,
                r.location_details, r.damage_description, r.relief_type, r.priority,
                r.status, r.assigned_team, r.admin_remark, r.created_at, r.updated_at
         FROM relief_requests r
         LEFT JOIN profiles p ON r.citizen_id = p.id
         ORDER BY r.created_at DESC",
    )?;

    let rows = stmt
        .query_map([], map_request_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_request_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReliefRequestRow> {
    Ok(ReliefRequestRow {
        id: row.get(0)?,
        citizen_id: row.get(1)?,
        citizen_name: row.get(2)?,
        disaster_type: row.get(3)?,
        ward_number: row.get(4)?,
        location_details: row.get(5)?,
        damage_description: row.get(6)?,
        relief_type: row.get(7)?,
        priority: row.get(8)?,
        status: row.get(9)?,
        assigned_team: row.get(10)?,
        admin_remark: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

fn query_stats(conn: &Connection) -> Result<RequestStats, StoreError> {
    let mut stmt = conn.prepare("SELECT status, priority, disaster_type FROM relief_requests")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut stats = RequestStats::default();
    for row in rows {
        let (status, priority, disaster_type) = row?;
        stats.total += 1;

        match status.as_str() {
            "pending" => stats.pending += 1,
            "approved" => stats.approved += 1,
            "assigned" => stats.assigned += 1,
            "resolved" => stats.resolved += 1,
            other => warn!("Unknown status '{}' in stats", other),
        }

        match priority.as_str() {
            "low" => stats.low += 1,
            "medium" => stats.medium += 1,
            "high" => stats.high += 1,
            "critical" => stats.critical += 1,
            other => warn!("Unknown priority '{}' in stats", other),
        }

        match disaster_type.as_str() {
            "flood" => stats.by_disaster_type.flood += 1,
            "earthquake" => stats.by_disaster_type.earthquake += 1,
            "landslide" => stats.by_disaster_type.landslide += 1,
            "fire" => stats.by_disaster_type.fire += 1,
            other => warn!("Unknown disaster type '{}' in stats", other),
        }
    }

    Ok(stats)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, StoreError>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, StoreError> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
