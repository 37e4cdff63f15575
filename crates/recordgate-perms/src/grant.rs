//! Grants and the views returned to callers.

use serde::{Deserialize, Serialize};

use recordgate_core::{Height, PermissionLabel, Principal, RecordId};

/// A permission granted by a record owner to another principal.
///
/// Identified by `(owner, record_id, grantee)`. A grant may outlive its
/// record and applies again if the owner stores a new record at the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// The record owner who issued the grant.
    pub owner: Principal,

    /// The record the grant applies to.
    pub record_id: RecordId,

    /// The principal receiving access.
    pub grantee: Principal,

    /// What the grant allows.
    pub label: PermissionLabel,

    /// Height at which the grant stops being effective. Zero never expires.
    pub expiration: Height,

    /// Whether the owner may remove the grant before it expires.
    pub revocable: bool,
}

impl Grant {
    /// Create a grant that never expires.
    pub fn new(
        owner: Principal,
        record_id: RecordId,
        grantee: Principal,
        label: PermissionLabel,
    ) -> Self {
        Self {
            owner,
            record_id,
            grantee,
            label,
            expiration: Height::ZERO,
            revocable: true,
        }
    }

    /// Set the expiration height.
    pub fn expires_at(mut self, expiration: impl Into<Height>) -> Self {
        self.expiration = expiration.into();
        self
    }

    /// Set whether the grant may be revoked.
    pub fn revocable(mut self, revocable: bool) -> Self {
        self.revocable = revocable;
        self
    }

    /// The caller-facing view of this grant.
    pub fn view(&self) -> GrantView {
        GrantView {
            label: self.label,
            expiration: self.expiration,
            revocable: self.revocable,
        }
    }
}

/// Grant attributes as reported by a permission status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantView {
    pub label: PermissionLabel,
    pub expiration: Height,
    pub revocable: bool,
}

impl GrantView {
    /// The synthetic view reported when no grant exists.
    pub const NONE: Self = Self {
        label: PermissionLabel::None,
        expiration: Height::ZERO,
        revocable: false,
    };
}

/// Result of a permission status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionStatus {
    /// A grant exists and has not expired. The label is not consulted.
    pub has_permission: bool,

    /// The stored grant, even if expired, or [`GrantView::NONE`].
    pub info: GrantView,
}
