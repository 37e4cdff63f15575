//! The Ledger: unified API for RecordGate.
//!
//! The Ledger sequences the record, grant, log and settings stores behind a
//! single serialized entry point. Every operation validates all of its input
//! before the first write, so a failed call leaves the stores untouched.

use recordgate_core::{
    validate_content, validate_content_type, validate_expiration, validate_record_id,
    AccessAction, AccessError, Height, InputLimits, LogEntry, PermissionLabel, Principal,
    PrivacySettings, Record, RecordId, RequestContext,
};
use recordgate_perms::{permission_status, Grant, PermissionStatus};
use recordgate_store::{Store, StoreStats};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::authz;
use crate::error::Result;

/// Configuration for the Ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerConfig {
    /// String-length ceilings applied before any other validation.
    pub limits: InputLimits,
}

/// The query window echoed back by [`Ledger::access_logs`].
///
/// Enumeration of entries inside the window is left to an external indexer;
/// single entries can be read with [`Store::get_log_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogWindow {
    pub record_id: RecordId,
    pub start: Height,
    pub end: Height,
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Storing, fetching and deleting owner-scoped records
/// - Granting and revoking per-record permissions
/// - Querying the access log
/// - Managing per-owner privacy settings
pub struct Ledger<S: Store> {
    /// The storage backend.
    store: S,
    /// Configuration.
    config: LedgerConfig,
    /// Held for the whole of every public operation.
    serial: Mutex<()>,
}

impl<S: Store> Ledger<S> {
    /// Create a new ledger over `store`.
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self {
            store,
            config,
            serial: Mutex::new(()),
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Parse a permission label received as a string, applying the
    /// configured length ceiling first.
    pub fn parse_label(&self, label: &str) -> Result<PermissionLabel> {
        Ok(self.config.limits.label(label)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Data Store
    // ─────────────────────────────────────────────────────────────────────────

    /// Create or overwrite the caller's record at `record_id`.
    ///
    /// The record is marked encrypted if `encrypted` is set or the caller's
    /// settings encrypt by default. An overwrite keeps the original
    /// `created_at`.
    pub async fn store_data(
        &self,
        ctx: &RequestContext,
        record_id: &str,
        content: &str,
        content_type: &str,
        encrypted: bool,
    ) -> Result<()> {
        let _serial = self.serial.lock().await;

        let limits = &self.config.limits;
        limits.check_record_id(record_id)?;
        limits.check_content(content)?;
        limits.check_content_type(content_type)?;

        let record_id = validate_record_id(record_id)?;
        validate_content(content)?;
        validate_content_type(content_type)?;

        let owner = ctx.caller;
        let settings = PrivacySettings::resolve(self.store.get_settings(&owner).await?);
        let encrypted = encrypted || settings.encrypt_by_default;

        let (record, action) = match self.store.get_record(&owner, &record_id).await? {
            Some(mut existing) => {
                existing.overwrite(content, content_type, encrypted, ctx.height);
                (existing, AccessAction::Update)
            }
            None => (
                Record::new(owner, record_id.clone(), content, content_type, encrypted, ctx.height),
                AccessAction::Create,
            ),
        };

        self.store.put_record(&record).await?;
        self.record_access(&owner, &record_id, &owner, action, ctx.height)
            .await;

        debug!(
            owner = %owner,
            record_id = %record_id,
            height = %ctx.height,
            action = %action,
            encrypted,
            "stored record"
        );

        Ok(())
    }

    /// Fetch `owner`'s record at `record_id` on behalf of the caller.
    ///
    /// Requires the caller to be the owner or to hold a live `read` (or
    /// `admin`) grant. The read is logged against the caller.
    pub async fn fetch_data(
        &self,
        ctx: &RequestContext,
        owner: &Principal,
        record_id: &str,
    ) -> Result<Record> {
        let _serial = self.serial.lock().await;

        self.config.limits.check_record_id(record_id)?;
        let record_id = validate_record_id(record_id)?;

        let record = self
            .store
            .get_record(owner, &record_id)
            .await?
            .ok_or(AccessError::DataNotFound)?;

        let allowed = authz::decide(
            &self.store,
            owner,
            &record_id,
            &ctx.caller,
            PermissionLabel::Read,
            ctx.height,
        )
        .await?;

        if !allowed {
            warn!(
                owner = %owner,
                record_id = %record_id,
                accessor = %ctx.caller,
                height = %ctx.height,
                "read denied"
            );
            return Err(AccessError::NotAuthorized.into());
        }

        self.record_access(owner, &record_id, &ctx.caller, AccessAction::Read, ctx.height)
            .await;

        Ok(record)
    }

    /// Remove the caller's record at `record_id`.
    ///
    /// Grants naming the record are left in place.
    pub async fn delete_data(&self, ctx: &RequestContext, record_id: &str) -> Result<()> {
        let _serial = self.serial.lock().await;

        self.config.limits.check_record_id(record_id)?;
        let record_id = validate_record_id(record_id)?;
        let owner = ctx.caller;

        if !self.store.delete_record(&owner, &record_id).await? {
            return Err(AccessError::DataNotFound.into());
        }

        self.record_access(&owner, &record_id, &owner, AccessAction::Delete, ctx.height)
            .await;

        debug!(owner = %owner, record_id = %record_id, height = %ctx.height, "deleted record");
        Ok(())
    }

    /// Log a deletion request against the caller's record at `record_id`.
    ///
    /// Changes nothing besides the access log.
    pub async fn request_deletion(&self, ctx: &RequestContext, record_id: &str) -> Result<()> {
        let _serial = self.serial.lock().await;

        self.config.limits.check_record_id(record_id)?;
        let record_id = validate_record_id(record_id)?;
        let owner = ctx.caller;

        self.require_record(&owner, &record_id).await?;

        self.record_access(&owner, &record_id, &owner, AccessAction::DeleteReq, ctx.height)
            .await;

        debug!(owner = %owner, record_id = %record_id, height = %ctx.height, "deletion requested");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Registry
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant `grantee` `label` on the caller's record at `record_id`.
    ///
    /// An existing grant for the same grantee is replaced. `expiration` must
    /// be zero (never) or above the current height.
    ///
    /// Granting to the caller itself fails with `InvalidInput`, since the
    /// owner's access is implicit.
    pub async fn grant_permission(
        &self,
        ctx: &RequestContext,
        record_id: &str,
        grantee: &Principal,
        label: PermissionLabel,
        expiration: Height,
        revocable: bool,
    ) -> Result<()> {
        let _serial = self.serial.lock().await;

        self.config.limits.check_record_id(record_id)?;
        let record_id = validate_record_id(record_id)?;
        validate_expiration(expiration, ctx.height)?;

        let owner = ctx.caller;
        // Ownership is implicit and never stored as a grant.
        if grantee == &owner {
            return Err(AccessError::InvalidInput.into());
        }

        self.require_record(&owner, &record_id).await?;

        let grant = Grant::new(owner, record_id.clone(), *grantee, label)
            .expires_at(expiration)
            .revocable(revocable);
        self.store.put_grant(&grant).await?;

        self.record_access(&owner, &record_id, &owner, AccessAction::Grant, ctx.height)
            .await;

        debug!(
            owner = %owner,
            record_id = %record_id,
            grantee = %grantee,
            label = %label,
            expiration = %expiration,
            revocable,
            "granted permission"
        );

        Ok(())
    }

    /// Remove `grantee`'s grant on the caller's record at `record_id`.
    ///
    /// Fails with `NotAuthorized` if the grant was made irrevocable.
    pub async fn revoke_permission(
        &self,
        ctx: &RequestContext,
        record_id: &str,
        grantee: &Principal,
    ) -> Result<()> {
        let _serial = self.serial.lock().await;

        self.config.limits.check_record_id(record_id)?;
        let record_id = validate_record_id(record_id)?;
        let owner = ctx.caller;

        let grant = self
            .store
            .get_grant(&owner, &record_id, grantee)
            .await?
            .ok_or(AccessError::DataNotFound)?;

        if !grant.revocable {
            return Err(AccessError::NotAuthorized.into());
        }

        self.store.delete_grant(&owner, &record_id, grantee).await?;

        self.record_access(&owner, &record_id, &owner, AccessAction::Revoke, ctx.height)
            .await;

        debug!(owner = %owner, record_id = %record_id, grantee = %grantee, "revoked permission");
        Ok(())
    }

    /// Report `accessor`'s grant on `owner`'s record.
    ///
    /// Only the owner or the accessor may ask.
    pub async fn permission_status(
        &self,
        ctx: &RequestContext,
        owner: &Principal,
        record_id: &str,
        accessor: &Principal,
    ) -> Result<PermissionStatus> {
        let _serial = self.serial.lock().await;

        self.config.limits.check_record_id(record_id)?;
        let record_id = validate_record_id(record_id)?;

        if ctx.caller != *owner && ctx.caller != *accessor {
            return Err(AccessError::NotAuthorized.into());
        }

        let grant = self.store.get_grant(owner, &record_id, accessor).await?;
        Ok(permission_status(grant.as_ref(), ctx.height))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access Log
    // ─────────────────────────────────────────────────────────────────────────

    /// Authorize a log query over the caller's record and echo the window.
    pub async fn access_logs(
        &self,
        ctx: &RequestContext,
        record_id: &str,
        start: Height,
        end: Height,
    ) -> Result<LogWindow> {
        let _serial = self.serial.lock().await;

        self.config.limits.check_record_id(record_id)?;
        let record_id = validate_record_id(record_id)?;

        if self.store.get_record(&ctx.caller, &record_id).await?.is_none() {
            return Err(AccessError::NotAuthorized.into());
        }

        Ok(LogWindow {
            record_id,
            start,
            end,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Privacy Settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Store the caller's settings, replacing any already present.
    pub async fn initialize_settings(
        &self,
        ctx: &RequestContext,
        default_permission: PermissionLabel,
        enable_logging: bool,
        encrypt_by_default: bool,
    ) -> Result<()> {
        let _serial = self.serial.lock().await;

        let settings = PrivacySettings::new(default_permission, enable_logging, encrypt_by_default);
        self.store.put_settings(&ctx.caller, &settings).await?;

        debug!(owner = %ctx.caller, ?settings, "initialized privacy settings");
        Ok(())
    }

    /// Replace the caller's settings. They must have been initialized.
    pub async fn update_settings(
        &self,
        ctx: &RequestContext,
        default_permission: PermissionLabel,
        enable_logging: bool,
        encrypt_by_default: bool,
    ) -> Result<()> {
        let _serial = self.serial.lock().await;

        if self.store.get_settings(&ctx.caller).await?.is_none() {
            return Err(AccessError::DataNotFound.into());
        }

        let settings = PrivacySettings::new(default_permission, enable_logging, encrypt_by_default);
        self.store.put_settings(&ctx.caller, &settings).await?;

        debug!(owner = %ctx.caller, ?settings, "updated privacy settings");
        Ok(())
    }

    /// The caller's settings, or the defaults if none were stored.
    pub async fn settings(&self, ctx: &RequestContext) -> Result<PrivacySettings> {
        let _serial = self.serial.lock().await;

        let stored = self.store.get_settings(&ctx.caller).await?;
        Ok(PrivacySettings::resolve(stored))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether `accessor` may act on `owner`'s record with `required` at `now`.
    ///
    /// Does not require the record to exist and does not log.
    pub async fn decide(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        accessor: &Principal,
        required: PermissionLabel,
        now: Height,
    ) -> Result<bool> {
        let _serial = self.serial.lock().await;
        Ok(authz::decide(&self.store, owner, record_id, accessor, required, now).await?)
    }

    /// Row counts for each store.
    pub async fn stats(&self) -> Result<StoreStats> {
        let _serial = self.serial.lock().await;
        Ok(self.store.stats().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────

    async fn require_record(&self, owner: &Principal, record_id: &RecordId) -> Result<()> {
        match self.store.get_record(owner, record_id).await? {
            Some(_) => Ok(()),
            None => Err(AccessError::DataNotFound.into()),
        }
    }

    /// Append to the owner's access log if their settings allow it.
    ///
    /// Never fails the calling operation.
    async fn record_access(
        &self,
        owner: &Principal,
        record_id: &RecordId,
        actor: &Principal,
        action: AccessAction,
        height: Height,
    ) {
        let settings = match self.store.get_settings(owner).await {
            Ok(stored) => PrivacySettings::resolve(stored),
            Err(e) => {
                warn!(owner = %owner, error = %e, "could not read privacy settings, logging anyway");
                PrivacySettings::DEFAULT
            }
        };

        if !settings.enable_logging {
            return;
        }

        let entry = LogEntry {
            owner: *owner,
            record_id: record_id.clone(),
            height,
            actor: *actor,
            action,
        };

        if let Err(e) = self.store.put_log_entry(&entry).await {
            warn!(
                owner = %owner,
                record_id = %record_id,
                height = %height,
                action = %action,
                error = %e,
                "failed to write access log entry"
            );
        }
    }
}
