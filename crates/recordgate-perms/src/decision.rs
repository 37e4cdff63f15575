//! The authorization decision.
//!
//! Everything here is a pure function of its arguments. The caller looks up
//! the grant for `(owner, record_id, accessor)` and passes it in.

use recordgate_core::{Height, PermissionLabel, Principal};

use crate::grant::{Grant, GrantView, PermissionStatus};

/// Whether an expiration has passed at `now`.
///
/// Zero never expires. Otherwise the grant is expired from the expiration
/// height onwards, so a grant expiring at 100 is dead at height 100.
pub fn is_expired(expiration: Height, now: Height) -> bool {
    !expiration.is_zero() && now >= expiration
}

/// Whether an expiration is still in force at `now`.
pub fn is_live(expiration: Height, now: Height) -> bool {
    !is_expired(expiration, now)
}

/// Decide whether `accessor` may act on a record of `owner` with `required`.
///
/// `grant` must be the grant stored for `(owner, record_id, accessor)`, if
/// any. The owner is always allowed without consulting it.
pub fn evaluate(
    owner: &Principal,
    accessor: &Principal,
    grant: Option<&Grant>,
    required: PermissionLabel,
    now: Height,
) -> bool {
    if accessor == owner {
        return true;
    }

    match grant {
        Some(grant) => grant.label.satisfies(required) && is_live(grant.expiration, now),
        None => false,
    }
}

/// Build the status report for a grant lookup.
///
/// `has_permission` reflects existence and liveness only; the stored view is
/// returned even when the grant has expired.
pub fn permission_status(grant: Option<&Grant>, now: Height) -> PermissionStatus {
    match grant {
        Some(grant) => PermissionStatus {
            has_permission: is_live(grant.expiration, now),
            info: grant.view(),
        },
        None => PermissionStatus {
            has_permission: false,
            info: GrantView::NONE,
        },
    }
}
