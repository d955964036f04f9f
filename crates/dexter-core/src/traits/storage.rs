// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::DexterError;
use crate::types::HealthStatus;

/// Adapter for storage and persistence backends.
///
/// Storage adapters own the database connection. The curation traits
/// ([`EvidenceStore`](crate::EvidenceStore), [`QuoteStore`](crate::QuoteStore))
/// are implemented on top of an initialized adapter.
#[async_trait]
pub trait StorageAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), DexterError>;

    /// Performs a health check and returns the backend's current status.
    async fn health_check(&self) -> Result<HealthStatus, DexterError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), DexterError>;
}
