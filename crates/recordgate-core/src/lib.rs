//! # RecordGate Core
//!
//! Pure primitives for RecordGate: principals, heights, records, permission
//! labels, privacy defaults, and boundary validation.
//!
//! This crate contains no I/O, no storage, no networking. Everything here is
//! plain data plus the checks applied to caller input before it reaches a store.
//!
//! ## Key Types
//!
//! - [`Principal`] - Opaque caller identity (an Ed25519 public key)
//! - [`Height`] - The host's monotonically non-decreasing height counter
//! - [`RequestContext`] - Caller and height supplied once per operation
//! - [`Record`] - An owner-scoped data record
//! - [`PermissionLabel`] - `read`, `write`, `admin` or `none`
//! - [`LogEntry`] / [`AccessAction`] - Audit trail entries
//! - [`PrivacySettings`] - Per-owner defaults with an explicit fallback
//! - [`AccessError`] - The fixed failure taxonomy

pub mod crypto;
pub mod error;
pub mod label;
pub mod record;
pub mod settings;
pub mod types;
pub mod validation;

pub use crypto::{Keypair, Principal};
pub use error::{AccessError, Result};
pub use label::PermissionLabel;
pub use record::{AccessAction, LogEntry, Record};
pub use settings::PrivacySettings;
pub use types::{Height, RecordId, RequestContext};
pub use validation::{
    validate_content, validate_content_type, validate_expiration, validate_record_id, InputLimits,
};
