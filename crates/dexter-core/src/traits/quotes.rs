// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quotation access used by duplicate detection.

use async_trait::async_trait;

use crate::error::DexterError;
use crate::types::{DocumentId, NewUtterance, Utterance, UtteranceId};

#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// All utterances in a document, in insertion order.
    async fn utterances_for_document(
        &self,
        document: DocumentId,
    ) -> Result<Vec<Utterance>, DexterError>;

    /// Store a new utterance and return its id.
    async fn insert_utterance(
        &self,
        utterance: &NewUtterance,
    ) -> Result<UtteranceId, DexterError>;
}
