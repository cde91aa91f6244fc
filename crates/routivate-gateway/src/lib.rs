// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the Routivate backend.
//!
//! Three endpoints under `/api` turn browser requests into repository calls:
//! `POST /track` and `POST /contact` append records, `GET /analytics`
//! aggregates counts and the most recent interactions. Every failure is
//! caught at the handler boundary and returned as a fixed JSON envelope.

pub mod client;
pub mod extract;
pub mod handlers;
pub mod server;

pub use client::ClientInfo;
pub use server::{build_router, serve, start_server, AppState, ServerConfig};
