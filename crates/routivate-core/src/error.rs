// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Routivate backend.

use thiserror::Error;

/// The error type shared by the store, the repositories, and the server.
#[derive(Debug, Error)]
pub enum RoutivateError {
    /// Configuration errors that surface after loading (bad bind address, etc.).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (missing permissions, disk full, failed rename).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A record could not be encoded or decoded.
    #[error("serialization error: {source}")]
    Serialization {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP server errors (bind failure, accept loop failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RoutivateError {
    /// Wraps an I/O failure from the storage medium.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage {
            source: source.into(),
        }
    }
}

impl From<serde_json::Error> for RoutivateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            source: Box::new(err),
        }
    }
}
