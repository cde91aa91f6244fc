// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact-form submissions.

use std::sync::Arc;

use routivate_core::{Collection, ContactRecord, RecordStore, RoutivateError};

use super::decode_records;

const COLLECTION: Collection = Collection::Contacts;

/// Repository for the `contacts` collection.
#[derive(Clone)]
pub struct ContactRepository {
    store: Arc<dyn RecordStore>,
}

impl ContactRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persists one submission.
    pub async fn save(&self, contact: &ContactRecord) -> Result<(), RoutivateError> {
        self.store.ensure_collection(COLLECTION).await?;
        self.store
            .append(COLLECTION, serde_json::to_value(contact)?)
            .await
    }

    /// Number of stored submissions.
    pub async fn count(&self) -> Result<usize, RoutivateError> {
        Ok(self.store.read_all(COLLECTION).await?.len())
    }

    /// Every stored submission in append order.
    pub async fn all(&self) -> Result<Vec<ContactRecord>, RoutivateError> {
        let values = self.store.read_all(COLLECTION).await?;
        Ok(decode_records(COLLECTION, values))
    }
}
