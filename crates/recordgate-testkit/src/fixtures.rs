//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use recordgate::{Ledger, LedgerConfig, Result};
use recordgate_core::{Height, Keypair, LogEntry, PermissionLabel, Principal, RecordId, RequestContext};
use recordgate_store::{MemoryStore, Store};

/// A deterministic principal for party `index`.
pub fn party(index: u8) -> Principal {
    let mut seed = [0u8; 32];
    seed[0] = index;
    Keypair::from_seed(&seed).principal()
}

/// Distinct deterministic principals for multi-party tests.
pub fn multi_party(count: u8) -> Vec<Principal> {
    (0..count).map(party).collect()
}

/// A ledger over an in-memory store.
pub struct TestFixture {
    pub ledger: Ledger<MemoryStore>,
}

impl TestFixture {
    /// Create a fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a fixture with a custom configuration.
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            ledger: Ledger::new(MemoryStore::new(), config),
        }
    }

    /// A request context for `caller` at `height`.
    pub fn ctx(&self, caller: &Principal, height: u64) -> RequestContext {
        RequestContext::new(*caller, height)
    }

    /// Store a plain-text note under `owner`.
    pub async fn store_note(
        &self,
        owner: &Principal,
        record_id: &str,
        content: &str,
        height: u64,
    ) -> Result<()> {
        self.ledger
            .store_data(&self.ctx(owner, height), record_id, content, "note", false)
            .await
    }

    /// Grant `label` on `owner`'s record, revocable and with the given expiration.
    pub async fn grant(
        &self,
        owner: &Principal,
        record_id: &str,
        grantee: &Principal,
        label: PermissionLabel,
        expiration: u64,
        height: u64,
    ) -> Result<()> {
        self.ledger
            .grant_permission(
                &self.ctx(owner, height),
                record_id,
                grantee,
                label,
                Height(expiration),
                true,
            )
            .await
    }

    /// The access log entry at `height`, if any.
    pub async fn log_entry(
        &self,
        owner: &Principal,
        record_id: &str,
        height: u64,
    ) -> Result<Option<LogEntry>> {
        Ok(self
            .ledger
            .store()
            .get_log_entry(owner, &RecordId::new(record_id), Height(height))
            .await?)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
