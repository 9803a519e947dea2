//! # AuditChain Testkit
//!
//! Testing utilities for the audit chain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Generators**: Proptest strategies for entries, leaf hashes, and
//!   metadata maps
//! - **Fixtures**: Helpers for setting up chains in known states
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use auditchain_testkit::generators::{entry_from_params, EntryParams};
//!
//! proptest! {
//!     #[test]
//!     fn entry_id_is_deterministic(params: EntryParams) {
//!         let e1 = entry_from_params(&params);
//!         let e2 = entry_from_params(&params);
//!         prop_assert_eq!(e1.id, e2.id);
//!     }
//! }
//! ```
//!
//! ## Fixtures
//!
//! ```rust
//! use auditchain_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::fully_sealed(4, 10);
//! assert_eq!(fixture.chain.summary().total_entries, 10);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::TestFixture;
pub use generators::{entry_from_params, EntryParams};
