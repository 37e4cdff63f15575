//! Database schema migrations for SQLite.
//!
//! A simple versioned migration system. Each migration transforms the
//! schema from version N to N+1.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// Idempotent: safe to call on every open.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let current: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    if current > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema version {} is newer than supported version {}",
            current, CURRENT_VERSION
        )));
    }

    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
            tracing::debug!(version, "applied schema migration");
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Owner-scoped records
        CREATE TABLE records (
            owner BLOB NOT NULL,              -- 32 bytes, principal
            record_id TEXT NOT NULL,
            content TEXT NOT NULL,
            content_type TEXT NOT NULL,
            encrypted INTEGER NOT NULL,       -- 0/1, intent only
            created_at INTEGER NOT NULL,      -- height
            last_modified INTEGER NOT NULL,   -- height
            PRIMARY KEY (owner, record_id)
        );

        -- One grant per (owner, record, grantee)
        CREATE TABLE grants (
            owner BLOB NOT NULL,
            record_id TEXT NOT NULL,
            grantee BLOB NOT NULL,
            label TEXT NOT NULL,              -- read / write / admin / none
            expiration INTEGER NOT NULL,      -- height, 0 = never
            revocable INTEGER NOT NULL,
            PRIMARY KEY (owner, record_id, grantee)
        );

        -- Access log, one entry per (owner, record, height)
        CREATE TABLE access_log (
            owner BLOB NOT NULL,
            record_id TEXT NOT NULL,
            height INTEGER NOT NULL,
            actor BLOB NOT NULL,
            action TEXT NOT NULL,
            PRIMARY KEY (owner, record_id, height)
        );

        -- Per-owner privacy defaults
        CREATE TABLE privacy_settings (
            owner BLOB PRIMARY KEY,
            default_permission TEXT NOT NULL,
            enable_logging INTEGER NOT NULL,
            encrypt_by_default INTEGER NOT NULL
        );

        CREATE INDEX idx_grants_grantee ON grants(grantee);
        "#,
    )?;

    Ok(())
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
