//! # RecordGate Testkit
//!
//! Testing utilities for RecordGate.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A ledger over a memory store plus deterministic parties
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use recordgate_testkit::generators::GrantParams;
//!
//! proptest! {
//!     #[test]
//!     fn expiration_is_never_at_or_below_grant_height(params: GrantParams) {
//!         prop_assert!(params.expiration == 0 || params.expiration > params.at);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust,ignore
//! use recordgate_testkit::fixtures::{party, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let owner = party(1);
//! fixture.store_note(&owner, "id1", "hello", 10).await.unwrap();
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{multi_party, party, TestFixture};
pub use generators::GrantParams;
