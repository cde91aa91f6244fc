// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lenient request body extraction.
//!
//! JSON and URL-encoded bodies are parsed into the target type. Any other
//! content type, an empty body, and a JSON body that is not an object yield
//! `T::default()`: the API stores whatever it is given and leaves field
//! validation to the caller. A body that does not parse at all gets the
//! plain-text 500 fallback.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::server::fallback_error_response;

/// Request body parsed from JSON or a URL-encoded form.
#[derive(Debug, Clone, Default)]
pub struct Payload<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Form,
    Other,
}

impl BodyFormat {
    fn of(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
            return Self::Other;
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            Self::Json
        } else if essence == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Other
        }
    }
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyFormat::of(req.headers()) {
            BodyFormat::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Self(T::default()));
                }
                let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
                    error!(error = %e, "failed to parse JSON request body");
                    fallback_error_response()
                })?;
                if !value.is_object() {
                    debug!("JSON body is not an object; treating as empty");
                    return Ok(Self(T::default()));
                }
                serde_json::from_value(value).map(Self).map_err(|e| {
                    error!(error = %e, "failed to decode JSON request body");
                    fallback_error_response()
                })
            }
            BodyFormat::Form => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(|e| {
                    error!(error = %e, "failed to parse form request body");
                    fallback_error_response()
                }),
            BodyFormat::Other => Ok(Self(T::default())),
        }
    }
}
