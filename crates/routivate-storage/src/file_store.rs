// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-file implementation of the [`RecordStore`] trait.
//!
//! Each collection is `<data_dir>/<collection>.json`, rewritten in full on
//! every append. Writers to the same collection queue on a per-collection
//! mutex held across the whole read-modify-write. The new snapshot is written
//! to a temporary file and renamed into place, so unlocked readers only ever
//! see a complete file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use routivate_config::model::StorageConfig;
use routivate_core::{Collection, HealthStatus, RecordStore, RoutivateError};

/// Record store backed by one JSON array file per collection.
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_locks: DashMap<Collection, Arc<Mutex<()>>>,
}

impl JsonFileStore {
    /// Create a store rooted at `data_dir`. Nothing is touched on disk until
    /// the first [`RecordStore::ensure_collection`].
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_locks: DashMap::new(),
        }
    }

    /// Create a store from the `[storage]` config section.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.data_dir)
    }

    /// Directory holding the collection files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing `collection`.
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    fn write_lock(&self, collection: Collection) -> Arc<Mutex<()>> {
        Arc::clone(self.write_locks.entry(collection).or_default().value())
    }

    /// Reads a collection file, treating absence and corruption as empty.
    async fn load(&self, collection: Collection) -> Vec<Value> {
        let path = self.collection_path(collection);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%collection, "collection file not found; treating as empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(%collection, path = %path.display(), error = %e, "failed to read collection; treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(%collection, path = %path.display(), error = %e, "failed to parse collection; treating as empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, collection: Collection, records: &[Value]) -> Result<(), RoutivateError> {
        let path = self.collection_path(collection);
        let payload = serde_json::to_vec_pretty(records)?;

        let temp_path = self
            .data_dir
            .join(format!(".{collection}.{}.tmp", uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&temp_path, payload)
            .await
            .map_err(RoutivateError::storage)?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(RoutivateError::storage(e));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn ensure_collection(&self, collection: Collection) -> Result<(), RoutivateError> {
        // create_dir_all treats an existing directory (including one created
        // by a concurrent caller) as success.
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(RoutivateError::storage)?;
        debug!(%collection, dir = %self.data_dir.display(), "collection ready");
        Ok(())
    }

    async fn append(&self, collection: Collection, record: Value) -> Result<(), RoutivateError> {
        let lock = self.write_lock(collection);
        let _guard = lock.lock().await;

        let mut records = self.load(collection).await;
        records.push(record);
        self.persist(collection, &records).await?;
        debug!(%collection, total = records.len(), "record appended");
        Ok(())
    }

    async fn read_all(&self, collection: Collection) -> Result<Vec<Value>, RoutivateError> {
        Ok(self.load(collection).await)
    }

    async fn health_check(&self) -> Result<HealthStatus, RoutivateError> {
        match tokio::fs::metadata(&self.data_dir).await {
            Ok(meta) if !meta.is_dir() => Ok(HealthStatus::Unhealthy(format!(
                "{} is not a directory",
                self.data_dir.display()
            ))),
            Ok(meta) if meta.permissions().readonly() => Ok(HealthStatus::Unhealthy(format!(
                "{} is read-only",
                self.data_dir.display()
            ))),
            Ok(_) => Ok(HealthStatus::Healthy),
            // Created lazily on first write.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HealthStatus::Healthy),
            Err(e) => Err(RoutivateError::storage(e)),
        }
    }
}
