//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for RecordGate. It uses rusqlite with
//! bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use recordgate_core::{
    AccessAction, Height, LogEntry, PermissionLabel, Principal, PrivacySettings, Record, RecordId,
};
use recordgate_perms::Grant;

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{Store, StoreStats};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking thread pool.
    async fn call<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(format!("connection mutex: {}", e)))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

// Heights are stored as INTEGER via a bit-preserving cast; they are only
// ever compared for equality inside SQL.
fn height_to_sql(height: Height) -> i64 {
    height.get() as i64
}

fn height_from_sql(value: i64) -> Height {
    Height(value as u64)
}

fn principal_from_blob(bytes: &[u8], column: &str) -> Result<Principal> {
    Principal::try_from(bytes).map_err(|_| {
        StoreError::InvalidData(format!(
            "{} must be 32 bytes, found {}",
            column,
            bytes.len()
        ))
    })
}

fn label_from_sql(value: &str) -> Result<PermissionLabel> {
    value
        .parse()
        .map_err(|_| StoreError::InvalidData(format!("unknown permission label: {}", value)))
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_record(
        &self,
        owner: &Principal,
        record_id: &RecordId,
    ) -> Result<Option<Record>> {
        let owner = *owner;
        let record_id = record_id.clone();

        self.call(move |conn| {
            let row: Option<(String, String, bool, i64, i64)> = conn
                .query_row(
                    "SELECT content, content_type, encrypted, created_at, last_modified
                     FROM records WHERE owner = ?1 AND record_id = ?2",
                    params![owner.as_bytes().as_slice(), record_id.as_str()],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
                )
                .optional()?;

            Ok(row.map(
                |(content, content_type, encrypted, created_at, last_modified)| Record {
                    owner,
                    record_id,
                    content,
                    content_type,
                    encrypted,
                    created_at: height_from_sql(created_at),
                    last_modified: height_from_sql(last_modified),
                },
            ))
        })
        .await
    }

    async fn put_record(&self, record: &Record) -> Result<()> {
        let record = record.clone();

        self.call(move |conn| {
            conn.execute(
                "INSERT INTO records (
                    owner, record_id, content, content_type, encrypted, created_at, last_modified
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(owner, record_id) DO UPDATE SET
                    content = excluded.content,
                    content_type = excluded.content_type,
                    encrypted = excluded.encrypted,
                    created_at = excluded.created_at,
                    last_modified = excluded.last_modified",
                params![
                    record.owner.as_bytes().as_slice(),
                    record.record_id.as_str(),
                    &record.content,
                    &record.content_type,
                    record.encrypted,
                    height_to_sql(record.created_at),
                    height_to_sql(record.last_modified),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_record(&self, owner: &Principal, record_id: &RecordId) -> Result<bool> {
        let owner = *owner;
        let record_id = record_id.clone();

        self.call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM records WHERE owner = ?1 AND record_id = ?2",
                params![owner.as_bytes().as_slice(), record_id.as_str()],
            )?;
            Ok(removed > 0)
        })
        .await
    }

    async fn get_grant(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        grantee: &Principal,
    ) -> Result<Option<Grant>> {
        let owner = *owner;
        let record_id = record_id.clone();
        let grantee = *grantee;

        self.call(move |conn| {
            let row: Option<(String, i64, bool)> = conn
                .query_row(
                    "SELECT label, expiration, revocable
                     FROM grants WHERE owner = ?1 AND record_id = ?2 AND grantee = ?3",
                    params![
                        owner.as_bytes().as_slice(),
                        record_id.as_str(),
                        grantee.as_bytes().as_slice()
                    ],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )
                .optional()?;

            let Some((label, expiration, revocable)) = row else {
                return Ok(None);
            };

            Ok(Some(Grant {
                owner,
                record_id,
                grantee,
                label: label_from_sql(&label)?,
                expiration: height_from_sql(expiration),
                revocable,
            }))
        })
        .await
    }

    async fn put_grant(&self, grant: &Grant) -> Result<()> {
        let grant = grant.clone();

        self.call(move |conn| {
            conn.execute(
                "INSERT INTO grants (owner, record_id, grantee, label, expiration, revocable)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(owner, record_id, grantee) DO UPDATE SET
                    label = excluded.label,
                    expiration = excluded.expiration,
                    revocable = excluded.revocable",
                params![
                    grant.owner.as_bytes().as_slice(),
                    grant.record_id.as_str(),
                    grant.grantee.as_bytes().as_slice(),
                    grant.label.as_str(),
                    height_to_sql(grant.expiration),
                    grant.revocable,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_grant(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        grantee: &Principal,
    ) -> Result<bool> {
        let owner = *owner;
        let record_id = record_id.clone();
        let grantee = *grantee;

        self.call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM grants WHERE owner = ?1 AND record_id = ?2 AND grantee = ?3",
                params![
                    owner.as_bytes().as_slice(),
                    record_id.as_str(),
                    grantee.as_bytes().as_slice()
                ],
            )?;
            Ok(removed > 0)
        })
        .await
    }

    async fn put_log_entry(&self, entry: &LogEntry) -> Result<()> {
        let entry = entry.clone();

        self.call(move |conn| {
            conn.execute(
                "INSERT INTO access_log (owner, record_id, height, actor, action)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(owner, record_id, height) DO UPDATE SET
                    actor = excluded.actor,
                    action = excluded.action",
                params![
                    entry.owner.as_bytes().as_slice(),
                    entry.record_id.as_str(),
                    height_to_sql(entry.height),
                    entry.actor.as_bytes().as_slice(),
                    entry.action.as_str(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_log_entry(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        height: Height,
    ) -> Result<Option<LogEntry>> {
        let owner = *owner;
        let record_id = record_id.clone();

        self.call(move |conn| {
            let row: Option<(Vec<u8>, String)> = conn
                .query_row(
                    "SELECT actor, action FROM access_log
                     WHERE owner = ?1 AND record_id = ?2 AND height = ?3",
                    params![
                        owner.as_bytes().as_slice(),
                        record_id.as_str(),
                        height_to_sql(height)
                    ],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            let Some((actor, action)) = row else {
                return Ok(None);
            };

            Ok(Some(LogEntry {
                owner,
                record_id,
                height,
                actor: principal_from_blob(&actor, "actor")?,
                action: action
                    .parse::<AccessAction>()
                    .map_err(StoreError::InvalidData)?,
            }))
        })
        .await
    }

    async fn get_settings(&self, owner: &Principal) -> Result<Option<PrivacySettings>> {
        let owner = *owner;

        self.call(move |conn| {
            let row: Option<(String, bool, bool)> = conn
                .query_row(
                    "SELECT default_permission, enable_logging, encrypt_by_default
                     FROM privacy_settings WHERE owner = ?1",
                    params![owner.as_bytes().as_slice()],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )
                .optional()?;

            row.map(|(label, enable_logging, encrypt_by_default)| -> Result<PrivacySettings> {
                Ok(PrivacySettings::new(
                    label_from_sql(&label)?,
                    enable_logging,
                    encrypt_by_default,
                ))
            })
            .transpose()
        })
        .await
    }

    async fn put_settings(&self, owner: &Principal, settings: &PrivacySettings) -> Result<()> {
        let owner = *owner;
        let settings = *settings;

        self.call(move |conn| {
            conn.execute(
                "INSERT INTO privacy_settings (
                    owner, default_permission, enable_logging, encrypt_by_default
                ) VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(owner) DO UPDATE SET
                    default_permission = excluded.default_permission,
                    enable_logging = excluded.enable_logging,
                    encrypt_by_default = excluded.encrypt_by_default",
                params![
                    owner.as_bytes().as_slice(),
                    settings.default_permission.as_str(),
                    settings.enable_logging,
                    settings.encrypt_by_default,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn stats(&self) -> Result<StoreStats> {
        self.call(|conn| {
            let count = |table: &str| -> Result<u64> {
                let n: i64 =
                    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                        row.get(0)
                    })?;
                Ok(n as u64)
            };

            Ok(StoreStats {
                records: count("records")?,
                grants: count("grants")?,
                log_entries: count("access_log")?,
                settings: count("privacy_settings")?,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgate_core::Keypair;

    fn principal(seed: u8) -> Principal {
        Keypair::from_seed(&[seed; 32]).principal()
    }

    #[tokio::test]
    async fn test_record_upsert_and_get() {
        let store = SqliteStore::open_memory().unwrap();
        let owner = principal(1);
        let id = RecordId::new("id1");

        let mut record = Record::new(owner, id.clone(), "hello", "note", false, Height(5));
        store.put_record(&record).await.unwrap();

        record.overwrite("bye", "text", true, Height(9));
        store.put_record(&record).await.unwrap();

        let retrieved = store.get_record(&owner, &id).await.unwrap().unwrap();
        assert_eq!(retrieved, record);
        assert_eq!(retrieved.created_at, Height(5));
        assert_eq!(store.stats().await.unwrap().records, 1);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let store = SqliteStore::open_memory().unwrap();
        let owner = principal(1);
        let id = RecordId::new("id1");
        let record = Record::new(owner, id.clone(), "hello", "note", false, Height(5));

        store.put_record(&record).await.unwrap();
        assert!(store.delete_record(&owner, &id).await.unwrap());
        assert!(!store.delete_record(&owner, &id).await.unwrap());
        assert!(store.get_record(&owner, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_grant_roundtrip() {
        let store = SqliteStore::open_memory().unwrap();
        let (owner, grantee) = (principal(1), principal(2));
        let id = RecordId::new("id1");
        let grant = Grant::new(owner, id.clone(), grantee, PermissionLabel::Admin)
            .expires_at(u64::MAX)
            .revocable(false);

        store.put_grant(&grant).await.unwrap();
        assert_eq!(
            store.get_grant(&owner, &id, &grantee).await.unwrap(),
            Some(grant)
        );

        assert!(store.delete_grant(&owner, &id, &grantee).await.unwrap());
        assert!(store.get_grant(&owner, &id, &grantee).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_log_entry_coalesces() {
        let store = SqliteStore::open_memory().unwrap();
        let (owner, reader) = (principal(1), principal(2));
        let id = RecordId::new("id1");

        let mut entry = LogEntry {
            owner,
            record_id: id.clone(),
            height: Height(3),
            actor: owner,
            action: AccessAction::Create,
        };
        store.put_log_entry(&entry).await.unwrap();

        entry.actor = reader;
        entry.action = AccessAction::Read;
        store.put_log_entry(&entry).await.unwrap();

        assert_eq!(
            store.get_log_entry(&owner, &id, Height(3)).await.unwrap(),
            Some(entry)
        );
        assert!(store.get_log_entry(&owner, &id, Height(4)).await.unwrap().is_none());
        assert_eq!(store.stats().await.unwrap().log_entries, 1);
    }

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let store = SqliteStore::open_memory().unwrap();
        let owner = principal(1);

        let settings = PrivacySettings::new(PermissionLabel::Write, false, true);
        store.put_settings(&owner, &settings).await.unwrap();
        assert_eq!(store.get_settings(&owner).await.unwrap(), Some(settings));
        assert!(store.get_settings(&principal(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recordgate.db");
        let owner = principal(1);
        let id = RecordId::new("id1");

        {
            let store = SqliteStore::open(&path).unwrap();
            let record = Record::new(owner, id.clone(), "hello", "note", false, Height(1));
            store.put_record(&record).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let record = store.get_record(&owner, &id).await.unwrap().unwrap();
        assert_eq!(record.content, "hello");
    }
}
