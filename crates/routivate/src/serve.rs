// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `routivate serve` command implementation.
//!
//! Builds the JSON-file record store once, hands it to the HTTP layer, and
//! serves until SIGINT or SIGTERM.

use std::sync::Arc;

use routivate_config::RoutivateConfig;
use routivate_core::{RecordStore, RoutivateError};
use routivate_gateway::{AppState, ServerConfig};
use routivate_storage::JsonFileStore;
use tracing::info;

use crate::shutdown;

/// Runs the `routivate serve` command.
pub async fn run_serve(config: RoutivateConfig) -> Result<(), RoutivateError> {
    init_tracing(&config.log.level);

    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::from_config(&config.storage));
    info!(data_dir = %config.storage.data_dir, "file-based storage initialized");

    let state = AppState::new(store).with_trust_forwarded_for(config.server.trust_forwarded_for);
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let token = shutdown::install_signal_handler();
    routivate_gateway::start_server(&server_config, state, token.cancelled_owned()).await
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn default_directives(log_level: &str) -> String {
    let level = log_level.trim().to_ascii_lowercase();
    format!("routivate={level},routivate_gateway={level},routivate_storage={level},tower_http={level},warn")
}
