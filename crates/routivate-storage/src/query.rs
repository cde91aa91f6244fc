// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter and query types for interaction records.

use std::cmp::Reverse;

use routivate_core::{FieldValue, InteractionRecord};

/// Exact-match filter over interaction fields.
///
/// Every field that is set must be present on the record as a string and
/// equal to it, byte for byte. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionFilter {
    pub kind: Option<String>,
    pub page: Option<String>,
    pub element: Option<String>,
    pub session_id: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl InteractionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match on the event `type`.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// True when no field is constrained.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &InteractionRecord) -> bool {
        field_matches(&self.kind, record.kind_str())
            && field_matches(&self.page, record.page.as_ref().and_then(FieldValue::as_str))
            && field_matches(&self.element, record.element.as_str())
            && field_matches(&self.session_id, record.session_id.as_str())
            && field_matches(&self.ip, Some(&record.ip))
            && field_matches(&self.user_agent, Some(&record.user_agent))
    }
}

fn field_matches(expected: &Option<String>, actual: Option<&str>) -> bool {
    match expected {
        Some(expected) => actual == Some(expected.as_str()),
        None => true,
    }
}

/// Most-recent-first listing of interactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionQuery {
    /// Keep only this event type. An empty string disables the filter.
    pub kind: Option<String>,
    /// Keep at most this many records. Zero means no limit.
    pub limit: Option<usize>,
}

impl InteractionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filters, sorts descending by timestamp, and truncates `records`.
    ///
    /// Records with a missing or unparsable timestamp rank below every valid
    /// one. The sort is stable, so ties keep append order.
    pub fn apply(&self, mut records: Vec<InteractionRecord>) -> Vec<InteractionRecord> {
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.is_empty()) {
            records.retain(|r| r.kind_str() == Some(kind));
        }

        records.sort_by_cached_key(|r| Reverse(r.parsed_timestamp()));

        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            records.truncate(limit);
        }
        records
    }
}
