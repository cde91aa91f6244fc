// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Routivate integration tests.
//!
//! # Components
//!
//! - [`InMemoryStore`] - record store kept in a map, no filesystem
//! - [`FailingStore`] - record store whose every operation errors
//! - [`TestHarness`] - store plus both repositories, built from a chosen backend

pub mod harness;
pub mod stores;

pub use harness::{StoreKind, TestHarness};
pub use stores::{FailingStore, InMemoryStore};
