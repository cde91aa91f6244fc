// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness assembling a store and both repositories.

use std::sync::Arc;

use routivate_core::{RecordStore, RoutivateError};
use routivate_storage::{ContactRepository, InteractionRepository, JsonFileStore};

use crate::stores::{FailingStore, InMemoryStore};

/// Which record store backs the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// [`JsonFileStore`] in a fresh temporary directory.
    #[default]
    JsonFiles,
    /// [`InMemoryStore`].
    InMemory,
    /// [`FailingStore`].
    Failing,
}

/// A ready-to-use store with repositories on top.
///
/// The temporary data directory (if any) lives as long as the harness.
pub struct TestHarness {
    pub store: Arc<dyn RecordStore>,
    pub contacts: ContactRepository,
    pub interactions: InteractionRepository,
    temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    /// Harness over a JSON-file store in a temporary directory.
    pub fn new() -> Result<Self, RoutivateError> {
        Self::with_store(StoreKind::JsonFiles)
    }

    pub fn with_store(kind: StoreKind) -> Result<Self, RoutivateError> {
        let (store, temp_dir): (Arc<dyn RecordStore>, _) = match kind {
            StoreKind::JsonFiles => {
                let temp_dir = tempfile::TempDir::new().map_err(RoutivateError::storage)?;
                let store = JsonFileStore::new(temp_dir.path().join("data"));
                (Arc::new(store), Some(temp_dir))
            }
            StoreKind::InMemory => (Arc::new(InMemoryStore::new()), None),
            StoreKind::Failing => (Arc::new(FailingStore), None),
        };

        Ok(Self {
            contacts: ContactRepository::new(Arc::clone(&store)),
            interactions: InteractionRepository::new(Arc::clone(&store)),
            store,
            temp_dir,
        })
    }

    /// Data directory of a JSON-file harness.
    pub fn data_dir(&self) -> Option<std::path::PathBuf> {
        self.temp_dir.as_ref().map(|d| d.path().join("data"))
    }
}
