use rusqlite::Connection;
use tracing::info;

use crate::error::StoreError;

pub fn run(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS profiles (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            full_name   TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT 'citizen'
                        CHECK (role IN ('citizen', 'admin')),
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_profiles_role
            ON profiles(role);

        CREATE TABLE IF NOT EXISTS relief_requests (
            id                  TEXT PRIMARY KEY,
            citizen_id          TEXT NOT NULL REFERENCES profiles(id),
            disaster_type       TEXT NOT NULL
                                CHECK (disaster_type IN ('flood', 'earthquake', 'landslide', 'fire')),
            ward_number         INTEGER NOT NULL
                                CHECK (ward_number BETWEEN 1 AND 35),
            location_details    TEXT NOT NULL,
            damage_description  TEXT NOT NULL,
            relief_type         TEXT NOT NULL
                                CHECK (relief_type IN ('food', 'medical', 'shelter', 'evacuation')),
            priority            TEXT NOT NULL
                                CHECK (priority IN ('low', 'medium', 'high', 'critical')),
            status              TEXT NOT NULL DEFAULT 'pending'
                                CHECK (status IN ('pending', 'approved', 'assigned', 'resolved')),
            assigned_team       TEXT,
            admin_remark        TEXT,
            created_at          TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at          TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_requests_citizen
            ON relief_requests(citizen_id, created_at);

        CREATE INDEX IF NOT EXISTS idx_requests_created
            ON relief_requests(created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
