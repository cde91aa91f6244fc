// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Routivate backend.
//!
//! Holds the record types written by the API layer, the shared error type,
//! and the [`RecordStore`] trait that storage backends implement. Nothing in
//! this crate touches the filesystem or the network.

pub mod error;
pub mod traits;
pub mod types;

pub use error::RoutivateError;
pub use traits::RecordStore;
pub use types::{
    metadata_or_empty, Collection, ContactRecord, FieldValue, HealthStatus, InteractionRecord,
    Metadata, MetadataValue,
};
