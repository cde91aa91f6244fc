// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `routivate check` command implementation.
//!
//! Prints the resolved configuration and probes the data directory without
//! starting the server.

use routivate_config::RoutivateConfig;
use routivate_core::{HealthStatus, RecordStore, RoutivateError};
use routivate_storage::JsonFileStore;

/// Runs the `routivate check` command.
pub async fn run_check(config: &RoutivateConfig) -> Result<(), RoutivateError> {
    let resolved = toml::to_string_pretty(config)
        .map_err(|e| RoutivateError::Config(format!("failed to render config: {e}")))?;
    println!("{resolved}");

    let store = JsonFileStore::from_config(&config.storage);
    let status = store.health_check().await?;
    println!("bind address: {}", config.server.bind_address());
    println!("data directory: {}", store.data_dir().display());
    report(&status)
}

fn report(status: &HealthStatus) -> Result<(), RoutivateError> {
    match status {
        HealthStatus::Healthy => {
            println!("storage: ok");
            Ok(())
        }
        HealthStatus::Unhealthy(reason) => Err(RoutivateError::Config(format!(
            "storage is not usable: {reason}"
        ))),
    }
}
