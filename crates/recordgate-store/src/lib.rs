//! # RecordGate Store
//!
//! Storage abstraction for RecordGate. The four state stores (records,
//! grants, access log, privacy settings) sit behind the [`Store`] trait so
//! the ledger is storage-agnostic.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests and embedding
//! - [`StoreStats`] - Row counts per store
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recordgate_store::{SqliteStore, Store};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("recordgate.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     let stats = store.stats().await.unwrap();
//!     assert_eq!(stats.records, 0);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Composite keys**: records by `(owner, record_id)`, grants by
//!   `(owner, record_id, grantee)`, log entries by `(owner, record_id, height)`,
//!   settings by `owner`.
//! - **Upserts**: every `put_*` replaces whatever was stored under the key.
//! - **No range scans**: the access log is written and point-read only.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{Store, StoreStats};
