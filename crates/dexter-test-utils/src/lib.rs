// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Dexter integration tests.
//!
//! # Components
//!
//! - [`MemoryStore`] - in-memory evidence and quote store with write tracking
//! - [`TestHarness`] - migrated SQLite store in a temporary directory, with
//!   seeding helpers

pub mod harness;
pub mod memory_store;

pub use harness::TestHarness;
pub use memory_store::MemoryStore;
