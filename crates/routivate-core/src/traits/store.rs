// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for append-and-read-all persistence backends.

use async_trait::async_trait;

use crate::error::RoutivateError;
use crate::types::{Collection, HealthStatus};

/// A durable, collection-scoped append log.
///
/// Records are opaque JSON values at this layer; the repositories in
/// `routivate-storage` encode and decode the typed records. Implementations
/// must guarantee that a record is visible to every later [`read_all`]
/// once [`append`] returns, and must not lose records when several appends
/// to the same collection run concurrently.
///
/// [`read_all`]: RecordStore::read_all
/// [`append`]: RecordStore::append
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Prepares the backing medium for writes to `collection`.
    ///
    /// Idempotent and safe to call concurrently.
    async fn ensure_collection(&self, collection: Collection) -> Result<(), RoutivateError>;

    /// Appends one record to the end of `collection`.
    async fn append(
        &self,
        collection: Collection,
        record: serde_json::Value,
    ) -> Result<(), RoutivateError>;

    /// Returns every record of `collection` in append order.
    ///
    /// A collection that was never written (or cannot be decoded) is empty.
    async fn read_all(&self, collection: Collection)
        -> Result<Vec<serde_json::Value>, RoutivateError>;

    /// Reports whether the store can currently accept writes.
    async fn health_check(&self) -> Result<HealthStatus, RoutivateError> {
        Ok(HealthStatus::Healthy)
    }
}
