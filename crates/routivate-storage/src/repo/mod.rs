// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed repositories over a [`RecordStore`](routivate_core::RecordStore).

pub mod contacts;
pub mod interactions;

pub use contacts::ContactRepository;
pub use interactions::InteractionRepository;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use routivate_core::Collection;

/// Decodes stored values, skipping (and logging) any that do not fit `T`.
pub(crate) fn decode_records<T: DeserializeOwned>(
    collection: Collection,
    values: Vec<Value>,
) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(%collection, index, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect()
}
