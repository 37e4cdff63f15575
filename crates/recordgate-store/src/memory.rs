//! In-memory implementation of the Store trait.
//!
//! Same semantics as SQLite, but keeps everything in memory with no
//! persistence.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use recordgate_core::{Height, LogEntry, Principal, PrivacySettings, Record, RecordId};
use recordgate_perms::Grant;

use crate::error::{Result, StoreError};
use crate::traits::{Store, StoreStats};

type RecordKey = (Principal, RecordId);
type GrantKey = (Principal, RecordId, Principal);
type LogKey = (Principal, RecordId, Height);

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Records: (owner, record_id) -> record.
    records: HashMap<RecordKey, Record>,

    /// Grants: (owner, record_id, grantee) -> grant.
    grants: HashMap<GrantKey, Grant>,

    /// Access log: (owner, record_id, height) -> entry.
    log: HashMap<LogKey, LogEntry>,

    /// Privacy settings by owner.
    settings: HashMap<Principal, PrivacySettings>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_record(
        &self,
        owner: &Principal,
        record_id: &RecordId,
    ) -> Result<Option<Record>> {
        let inner = self.read()?;
        Ok(inner.records.get(&(*owner, record_id.clone())).cloned())
    }

    async fn put_record(&self, record: &Record) -> Result<()> {
        let mut inner = self.write()?;
        inner
            .records
            .insert((record.owner, record.record_id.clone()), record.clone());
        Ok(())
    }

    async fn delete_record(&self, owner: &Principal, record_id: &RecordId) -> Result<bool> {
        let mut inner = self.write()?;
        Ok(inner.records.remove(&(*owner, record_id.clone())).is_some())
    }

    async fn get_grant(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        grantee: &Principal,
    ) -> Result<Option<Grant>> {
        let inner = self.read()?;
        Ok(inner
            .grants
            .get(&(*owner, record_id.clone(), *grantee))
            .cloned())
    }

    async fn put_grant(&self, grant: &Grant) -> Result<()> {
        let mut inner = self.write()?;
        inner.grants.insert(
            (grant.owner, grant.record_id.clone(), grant.grantee),
            grant.clone(),
        );
        Ok(())
    }

    async fn delete_grant(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        grantee: &Principal,
    ) -> Result<bool> {
        let mut inner = self.write()?;
        Ok(inner
            .grants
            .remove(&(*owner, record_id.clone(), *grantee))
            .is_some())
    }

    async fn put_log_entry(&self, entry: &LogEntry) -> Result<()> {
        let mut inner = self.write()?;
        inner.log.insert(
            (entry.owner, entry.record_id.clone(), entry.height),
            entry.clone(),
        );
        Ok(())
    }

    async fn get_log_entry(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        height: Height,
    ) -> Result<Option<LogEntry>> {
        let inner = self.read()?;
        Ok(inner.log.get(&(*owner, record_id.clone(), height)).cloned())
    }

    async fn get_settings(&self, owner: &Principal) -> Result<Option<PrivacySettings>> {
        let inner = self.read()?;
        Ok(inner.settings.get(owner).copied())
    }

    async fn put_settings(&self, owner: &Principal, settings: &PrivacySettings) -> Result<()> {
        let mut inner = self.write()?;
        inner.settings.insert(*owner, *settings);
        Ok(())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let inner = self.read()?;
        Ok(StoreStats {
            records: inner.records.len() as u64,
            grants: inner.grants.len() as u64,
            log_entries: inner.log.len() as u64,
            settings: inner.settings.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgate_core::{AccessAction, Keypair, PermissionLabel};

    fn principal(seed: u8) -> Principal {
        Keypair::from_seed(&[seed; 32]).principal()
    }

    #[tokio::test]
    async fn test_record_roundtrip_and_delete() {
        let store = MemoryStore::new();
        let owner = principal(1);
        let id = RecordId::new("id1");
        let record = Record::new(owner, id.clone(), "hello", "note", false, Height(5));

        store.put_record(&record).await.unwrap();
        assert_eq!(store.get_record(&owner, &id).await.unwrap(), Some(record));

        assert!(store.delete_record(&owner, &id).await.unwrap());
        assert!(!store.delete_record(&owner, &id).await.unwrap());
        assert_eq!(store.get_record(&owner, &id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_records_are_owner_scoped() {
        let store = MemoryStore::new();
        let id = RecordId::new("shared-name");
        let record = Record::new(principal(1), id.clone(), "a", "t", false, Height(1));
        store.put_record(&record).await.unwrap();

        assert!(store.get_record(&principal(2), &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_grant_overwrite() {
        let store = MemoryStore::new();
        let (owner, grantee) = (principal(1), principal(2));
        let id = RecordId::new("id1");

        let first = Grant::new(owner, id.clone(), grantee, PermissionLabel::Read);
        let second = Grant::new(owner, id.clone(), grantee, PermissionLabel::Write)
            .expires_at(50)
            .revocable(false);

        store.put_grant(&first).await.unwrap();
        store.put_grant(&second).await.unwrap();

        assert_eq!(
            store.get_grant(&owner, &id, &grantee).await.unwrap(),
            Some(second)
        );
        assert_eq!(store.stats().await.unwrap().grants, 1);
    }

    #[tokio::test]
    async fn test_log_entries_coalesce_per_height() {
        let store = MemoryStore::new();
        let owner = principal(1);
        let id = RecordId::new("id1");

        for action in [AccessAction::Create, AccessAction::Update] {
            store
                .put_log_entry(&LogEntry {
                    owner,
                    record_id: id.clone(),
                    height: Height(7),
                    actor: owner,
                    action,
                })
                .await
                .unwrap();
        }

        let entry = store.get_log_entry(&owner, &id, Height(7)).await.unwrap().unwrap();
        assert_eq!(entry.action, AccessAction::Update);
        assert_eq!(store.stats().await.unwrap().log_entries, 1);
    }

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let store = MemoryStore::new();
        let owner = principal(1);
        assert!(store.get_settings(&owner).await.unwrap().is_none());

        let settings = PrivacySettings::new(PermissionLabel::Read, false, true);
        store.put_settings(&owner, &settings).await.unwrap();
        assert_eq!(store.get_settings(&owner).await.unwrap(), Some(settings));
    }
}
