// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./routivate.toml` > `~/.config/routivate/routivate.toml` >
//! `/etc/routivate/routivate.toml`, with `ROUTIVATE_*` environment overrides
//! and the conventional bare `PORT` variable on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RoutivateConfig;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "routivate.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/routivate/routivate.toml";

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("routivate").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/routivate/routivate.toml`
/// 3. `~/.config/routivate/routivate.toml`
/// 4. `./routivate.toml`
/// 5. `ROUTIVATE_*` environment variables
/// 6. `PORT`
pub fn load_config() -> Result<RoutivateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<RoutivateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RoutivateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RoutivateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RoutivateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(port_provider())
        .extract()
}

/// Build the Figment used for standard config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RoutivateConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
        .merge(port_provider())
}

/// `ROUTIVATE_*` provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that keys containing
/// underscores survive: `ROUTIVATE_SERVER_TRUST_FORWARDED_FOR` must become
/// `server.trust_forwarded_for`, not `server.trust.forwarded.for`.
fn env_provider() -> Env {
    Env::prefixed("ROUTIVATE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}

/// Bare `PORT`, as set by most hosting platforms.
fn port_provider() -> Env {
    Env::raw().only(&["port"]).map(|_| "server.port".into())
}
