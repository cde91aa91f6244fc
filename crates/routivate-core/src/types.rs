// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types persisted by the Routivate backend.
//!
//! Field names serialize in camelCase so that the JSON files stay readable by
//! the browser-side tooling that consumes `/api/analytics`. Every field has a
//! serde default: records written with fewer fields still decode.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// A named, independently stored set of records of one kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Contacts,
    Interactions,
}

impl Collection {
    /// File name of the collection inside the data directory.
    pub fn file_name(self) -> String {
        format!("{self}.json")
    }
}

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is accepting writes.
    Healthy,
    /// Store cannot accept writes.
    Unhealthy(String),
}

/// Free-form per-event metadata value.
///
/// A closed union over what JSON can carry. Integers that fit `i64` or `u64`
/// stay integers; every other number becomes a float.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<MetadataValue>),
    Map(BTreeMap<String, MetadataValue>),
}

/// A client-supplied record field, stored exactly as received.
pub type FieldValue = MetadataValue;

impl MetadataValue {
    /// The empty string.
    pub fn empty() -> Self {
        Self::String(String::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// JavaScript truthiness: `null`, `false`, zero, NaN and `""` are falsy.
    /// Arrays and maps are truthy even when empty.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Integer(n) => *n == 0,
            Self::UInt(n) => *n == 0,
            Self::Float(f) => *f == 0.0 || f.is_nan(),
            Self::String(s) => s.is_empty(),
            Self::Array(_) | Self::Map(_) => false,
        }
    }

    /// Replaces a falsy value with the empty string.
    pub fn or_empty(self) -> Self {
        if self.is_falsy() { Self::empty() } else { self }
    }
}

impl PartialEq<str> for MetadataValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for MetadataValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for MetadataValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Mapping attached to every interaction record.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A contact-form submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<FieldValue>,
    /// ISO-8601 submission time.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub user_agent: String,
}

impl ContactRecord {
    /// Assigns the current server time if no timestamp is set.
    pub fn stamped(mut self) -> Self {
        if self.timestamp.is_empty() {
            self.timestamp = now_timestamp();
        }
        self
    }
}

/// A UI interaction event (page view, click, theme change, form outcome).
///
/// `type`, `page`, `element` and `sessionId` hold whatever JSON value the
/// client sent; only string values take part in filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    /// Event kind, e.g. `page_view` or `click`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldValue>,
    /// Originating path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<FieldValue>,
    #[serde(default = "FieldValue::empty")]
    pub element: FieldValue,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub timestamp: String,
    /// Client-generated key grouping events of one browsing visit.
    #[serde(default = "FieldValue::empty")]
    pub session_id: FieldValue,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub metadata: Metadata,
}

impl Default for InteractionRecord {
    fn default() -> Self {
        Self {
            kind: None,
            page: None,
            element: FieldValue::empty(),
            user_agent: String::new(),
            ip: String::new(),
            timestamp: String::new(),
            session_id: FieldValue::empty(),
            metadata: Metadata::new(),
        }
    }
}

impl InteractionRecord {
    /// The event type, when it is a string.
    pub fn kind_str(&self) -> Option<&str> {
        self.kind.as_ref().and_then(FieldValue::as_str)
    }

    /// Assigns the current server time if no timestamp is set.
    pub fn stamped(mut self) -> Self {
        if self.timestamp.is_empty() {
            self.timestamp = now_timestamp();
        }
        self
    }

    /// The timestamp as a UTC instant, or `None` if it is not RFC 3339.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Current UTC time with millisecond precision and a `Z` suffix.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Keeps a JSON object as metadata; any other value becomes the empty map.
pub fn metadata_or_empty(value: MetadataValue) -> Metadata {
    match value {
        MetadataValue::Map(map) => map,
        _ => Metadata::new(),
    }
}

fn object_or_empty<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    MetadataValue::deserialize(deserializer).map(metadata_or_empty)
}
