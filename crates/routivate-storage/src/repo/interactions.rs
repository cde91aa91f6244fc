// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI interaction events.

use std::sync::Arc;

use routivate_core::{Collection, InteractionRecord, RecordStore, RoutivateError};

use super::decode_records;
use crate::query::{InteractionFilter, InteractionQuery};

const COLLECTION: Collection = Collection::Interactions;

/// Repository for the `interactions` collection.
#[derive(Clone)]
pub struct InteractionRepository {
    store: Arc<dyn RecordStore>,
}

impl InteractionRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persists one event.
    pub async fn save(&self, interaction: &InteractionRecord) -> Result<(), RoutivateError> {
        self.store.ensure_collection(COLLECTION).await?;
        self.store
            .append(COLLECTION, serde_json::to_value(interaction)?)
            .await
    }

    /// Number of stored events matching `filter`.
    pub async fn count(&self, filter: &InteractionFilter) -> Result<usize, RoutivateError> {
        let values = self.store.read_all(COLLECTION).await?;
        if filter.is_empty() {
            return Ok(values.len());
        }
        Ok(decode_records::<InteractionRecord>(COLLECTION, values)
            .iter()
            .filter(|r| filter.matches(r))
            .count())
    }

    /// Most recent events first, filtered and limited by `query`.
    pub async fn find(
        &self,
        query: &InteractionQuery,
    ) -> Result<Vec<InteractionRecord>, RoutivateError> {
        Ok(query.apply(self.all().await?))
    }

    /// Every stored event in append order.
    pub async fn all(&self) -> Result<Vec<InteractionRecord>, RoutivateError> {
        let values = self.store.read_all(COLLECTION).await?;
        Ok(decode_records(COLLECTION, values))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::JsonFileStore;

    fn event(kind: &str, timestamp: &str) -> InteractionRecord {
        InteractionRecord {
            kind: Some(kind.into()),
            page: Some("/".into()),
            timestamp: timestamp.to_string(),
            ..Default::default()
        }
    }

    fn repo(dir: &std::path::Path) -> InteractionRepository {
        InteractionRepository::new(Arc::new(JsonFileStore::new(dir)))
    }

    #[tokio::test]
    async fn count_filters_exactly() {
        let dir = tempdir().unwrap();
        let repo = repo(dir.path());
        for kind in ["page_view", "click", "page_view", "Click", "theme_change"] {
            repo.save(&event(kind, "2026-01-01T00:00:00.000Z")).await.unwrap();
        }

        assert_eq!(repo.count(&InteractionFilter::new()).await.unwrap(), 5);
        assert_eq!(repo.count(&InteractionFilter::new().kind("page_view")).await.unwrap(), 2);
        assert_eq!(repo.count(&InteractionFilter::new().kind("click")).await.unwrap(), 1);
        assert_eq!(repo.count(&InteractionFilter::new().kind("form_submit")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_returns_most_recent_prefix() {
        let dir = tempdir().unwrap();
        let repo = repo(dir.path());
        repo.save(&event("click", "2026-01-01T00:00:01.000Z")).await.unwrap();
        repo.save(&event("click", "2026-01-01T00:00:03.000Z")).await.unwrap();
        repo.save(&event("click", "2026-01-01T00:00:02.000Z")).await.unwrap();

        let found = repo.find(&InteractionQuery::new().limit(2)).await.unwrap();
        let stamps: Vec<&str> = found.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(
            stamps,
            vec!["2026-01-01T00:00:03.000Z", "2026-01-01T00:00:02.000Z"]
        );

        // Storage order is untouched by find.
        let all = repo.all().await.unwrap();
        assert_eq!(all[0].timestamp, "2026-01-01T00:00:01.000Z");
    }

    #[tokio::test]
    async fn find_on_empty_collection_is_empty() {
        let dir = tempdir().unwrap();
        let found = repo(dir.path())
            .find(&InteractionQuery::new().limit(10))
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
