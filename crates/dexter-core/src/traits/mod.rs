// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait definitions.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility, so the
//! curation layer can run against `&dyn EvidenceStore` as well as concrete
//! adapters.

pub mod evidence;
pub mod quotes;
pub mod storage;

pub use evidence::EvidenceStore;
pub use quotes::QuoteStore;
pub use storage::StorageAdapter;
