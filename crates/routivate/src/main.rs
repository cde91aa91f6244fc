// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routivate - event-logging backend for the Routivate marketing site.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use routivate_config::{ConfigError, RoutivateConfig};

/// Routivate - records contact submissions and UI interaction events.
#[derive(Parser, Debug)]
#[command(name = "routivate", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this TOML file instead of the standard lookup.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Validate configuration and storage, then exit.
    Check,
}

fn load_config(path: Option<&std::path::Path>) -> Result<RoutivateConfig, Vec<ConfigError>> {
    match path {
        Some(path) => routivate_config::load_and_validate_path(path),
        None => routivate_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            routivate_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Check => check::run_check(&config).await,
    };

    if let Err(e) = result {
        eprintln!("routivate: {e}");
        std::process::exit(1);
    }
}
