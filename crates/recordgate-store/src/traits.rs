//! Store trait: the abstract interface for RecordGate state.
//!
//! This trait allows the ledger to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;

use recordgate_core::{Height, LogEntry, Principal, PrivacySettings, Record, RecordId};
use recordgate_perms::Grant;

use crate::error::Result;

/// Row counts for each of the four stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub records: u64,
    pub grants: u64,
    pub log_entries: u64,
    pub settings: u64,
}

/// The Store trait: async interface for RecordGate state.
///
/// Each method is a single atomic step against one store. The ledger
/// sequences them and guarantees that no mutation happens before all of an
/// operation's validation has passed.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a record by owner and id.
    async fn get_record(&self, owner: &Principal, record_id: &RecordId)
        -> Result<Option<Record>>;

    /// Insert or replace a record under `(record.owner, record.record_id)`.
    async fn put_record(&self, record: &Record) -> Result<()>;

    /// Remove a record. Returns whether one was removed.
    async fn delete_record(&self, owner: &Principal, record_id: &RecordId) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Grants
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the grant for `(owner, record_id, grantee)`.
    async fn get_grant(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        grantee: &Principal,
    ) -> Result<Option<Grant>>;

    /// Insert or replace a grant under `(owner, record_id, grantee)`.
    async fn put_grant(&self, grant: &Grant) -> Result<()>;

    /// Remove a grant. Returns whether one was removed.
    async fn delete_grant(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        grantee: &Principal,
    ) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Access log
    // ─────────────────────────────────────────────────────────────────────────

    /// Write a log entry, replacing any entry at the same key.
    async fn put_log_entry(&self, entry: &LogEntry) -> Result<()>;

    /// Get the log entry for `(owner, record_id, height)`.
    async fn get_log_entry(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        height: Height,
    ) -> Result<Option<LogEntry>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Privacy settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the stored settings for an owner, if any were ever stored.
    async fn get_settings(&self, owner: &Principal) -> Result<Option<PrivacySettings>>;

    /// Insert or replace an owner's settings.
    async fn put_settings(&self, owner: &Principal, settings: &PrivacySettings) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Maintenance
    // ─────────────────────────────────────────────────────────────────────────

    /// Count the rows held by each store.
    async fn stats(&self) -> Result<StoreStats>;
}
