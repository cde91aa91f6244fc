// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layer for the Routivate backend.
//!
//! [`JsonFileStore`] keeps one pretty-printed JSON array per collection and
//! serializes writers per collection, so concurrent appends never lose a
//! record. The repositories wrap any [`RecordStore`](routivate_core::RecordStore)
//! with typed save/count/find operations.

pub mod file_store;
pub mod query;
pub mod repo;

pub use file_store::JsonFileStore;
pub use query::{InteractionFilter, InteractionQuery};
pub use repo::{ContactRepository, InteractionRepository};
