//! # RecordGate
//!
//! Owner-scoped data records with per-record permission grants, an access
//! log and per-owner privacy defaults.
//!
//! ## Overview
//!
//! - **Records**: Keyed by `(owner, record_id)`. Only the owner writes.
//! - **Grants**: `read`, `write` or `admin` for one grantee on one record,
//!   optionally expiring at a height and optionally irrevocable.
//! - **Access log**: One entry per `(owner, record_id, height)`, written on
//!   every successful interaction unless the owner turned logging off.
//! - **Privacy settings**: Per-owner defaults, with a fixed fallback when the
//!   owner never stored any.
//!
//! The caller and the current height arrive together in a
//! [`RequestContext`]; nothing is read from ambient state.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recordgate::{Ledger, LedgerConfig, RequestContext};
//! use recordgate::core::{Height, Keypair, PermissionLabel};
//! use recordgate::store::SqliteStore;
//!
//! async fn example() {
//!     let alice = Keypair::generate().principal();
//!     let bob = Keypair::generate().principal();
//!
//!     let store = SqliteStore::open("recordgate.db").unwrap();
//!     let ledger = Ledger::new(store, LedgerConfig::default());
//!
//!     let ctx = RequestContext::new(alice, 100);
//!     ledger.store_data(&ctx, "id1", "hello", "note", false).await.unwrap();
//!     ledger
//!         .grant_permission(&ctx, "id1", &bob, PermissionLabel::Read, Height(150), true)
//!         .await
//!         .unwrap();
//!
//!     let record = ledger
//!         .fetch_data(&RequestContext::new(bob, 120), &alice, "id1")
//!         .await
//!         .unwrap();
//!     assert_eq!(record.content, "hello");
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `recordgate::core` - Core primitives (Principal, Record, AccessError, etc.)
//! - `recordgate::perms` - Grants and the authorization decision
//! - `recordgate::store` - Storage abstraction and SQLite

pub mod authz;
pub mod error;
pub mod ledger;

// Re-export component crates
pub use recordgate_core as core;
pub use recordgate_perms as perms;
pub use recordgate_store as store;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig, LogWindow};

// Re-export commonly used core types
pub use recordgate_core::{
    AccessAction, AccessError, Height, Keypair, LogEntry, PermissionLabel, Principal,
    PrivacySettings, Record, RecordId, RequestContext,
};
pub use recordgate_perms::{GrantView, PermissionStatus};
