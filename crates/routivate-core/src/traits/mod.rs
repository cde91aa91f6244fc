// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the storage seam.
//!
//! Traits use `#[async_trait]` so that backends can be held as
//! `Arc<dyn RecordStore>` and swapped in tests.

pub mod store;

pub use store::RecordStore;
