//! # RecordGate Permissions
//!
//! Grants and the authorization decision.
//!
//! ## Overview
//!
//! A [`Grant`] gives one grantee a [`PermissionLabel`] on one record of one
//! owner, optionally until an expiration height. There is at most one grant
//! per `(owner, record_id, grantee)`; granting again replaces it.
//!
//! The decision itself ([`evaluate`]) is a pure function of the owner, the
//! accessor, the grant that applies to them (if any), the label required and
//! the current height. It never touches storage or the access log. Loading
//! the grant is the caller's job.
//!
//! ## Rules
//!
//! - The owner is always allowed. Ownership is never stored as a grant.
//! - No grant means no access.
//! - Otherwise the grant must both carry `admin` or the exact required
//!   label, and be live: expiration `0`, or strictly above the current height.
//!
//! [`PermissionLabel`]: recordgate_core::PermissionLabel

pub mod decision;
pub mod grant;

pub use decision::{evaluate, is_expired, is_live, permission_status};
pub use grant::{Grant, GrantView, PermissionStatus};
