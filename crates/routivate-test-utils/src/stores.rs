// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process record stores for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use routivate_core::{Collection, HealthStatus, RecordStore, RoutivateError};

/// Record store held entirely in memory.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `collection` with raw values, bypassing the repositories.
    pub async fn seed(&self, collection: Collection, values: Vec<Value>) {
        self.collections
            .lock()
            .await
            .entry(collection)
            .or_default()
            .extend(values);
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn ensure_collection(&self, collection: Collection) -> Result<(), RoutivateError> {
        self.collections.lock().await.entry(collection).or_default();
        Ok(())
    }

    async fn append(&self, collection: Collection, record: Value) -> Result<(), RoutivateError> {
        self.collections
            .lock()
            .await
            .entry(collection)
            .or_default()
            .push(record);
        Ok(())
    }

    async fn read_all(&self, collection: Collection) -> Result<Vec<Value>, RoutivateError> {
        Ok(self
            .collections
            .lock()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }
}

/// Record store that fails every call, for exercising error paths.
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    fn error() -> RoutivateError {
        RoutivateError::storage(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "simulated storage failure",
        ))
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn ensure_collection(&self, _collection: Collection) -> Result<(), RoutivateError> {
        Err(Self::error())
    }

    async fn append(&self, _collection: Collection, _record: Value) -> Result<(), RoutivateError> {
        Err(Self::error())
    }

    async fn read_all(&self, _collection: Collection) -> Result<Vec<Value>, RoutivateError> {
        Err(Self::error())
    }

    async fn health_check(&self) -> Result<HealthStatus, RoutivateError> {
        Ok(HealthStatus::Unhealthy("simulated storage failure".to_string()))
    }
}
