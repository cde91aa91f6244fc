// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles GET /, POST /api/track, POST /api/contact, GET /api/analytics.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use routivate_core::{
    metadata_or_empty, ContactRecord, FieldValue, InteractionRecord, MetadataValue, RoutivateError,
};
use routivate_storage::{InteractionFilter, InteractionQuery};

use crate::client::ClientInfo;
use crate::extract::Payload;
use crate::server::AppState;

/// Event type counted as `pageViews`.
pub const PAGE_VIEW: &str = "page_view";

/// Event type counted as `clicks`.
pub const CLICK: &str = "click";

/// Number of interactions returned in `recentInteractions`.
pub const RECENT_INTERACTIONS_LIMIT: usize = 10;

/// Request body for POST /api/track.
///
/// Every field accepts any JSON value, so a client sending a number where a
/// string is expected still gets its event stored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<FieldValue>,
    #[serde(default)]
    pub page: Option<FieldValue>,
    #[serde(default)]
    pub element: Option<FieldValue>,
    #[serde(default)]
    pub session_id: Option<FieldValue>,
    #[serde(default)]
    pub metadata: Option<MetadataValue>,
}

impl TrackRequest {
    /// Builds the record to store, stamped with the server time.
    ///
    /// Falsy `element` and `sessionId` become `""`; metadata that is not a
    /// JSON object becomes the empty map.
    pub fn into_record(self, client: ClientInfo) -> InteractionRecord {
        InteractionRecord {
            kind: self.kind,
            page: self.page,
            element: self.element.unwrap_or_default().or_empty(),
            user_agent: client.user_agent,
            ip: client.ip,
            timestamp: String::new(),
            session_id: self.session_id.unwrap_or_default().or_empty(),
            metadata: self.metadata.map(metadata_or_empty).unwrap_or_default(),
        }
        .stamped()
    }
}

/// Request body for POST /api/contact.
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<FieldValue>,
    #[serde(default)]
    pub email: Option<FieldValue>,
    #[serde(default)]
    pub mobile: Option<FieldValue>,
    #[serde(default)]
    pub message: Option<FieldValue>,
}

impl ContactRequest {
    /// Builds the record to store, stamped with the server time.
    pub fn into_record(self, client: ClientInfo) -> ContactRecord {
        ContactRecord {
            name: self.name,
            email: self.email,
            mobile: self.mobile,
            message: self.message,
            timestamp: String::new(),
            ip: client.ip,
            user_agent: client.user_agent,
        }
        .stamped()
    }
}

/// Success envelope for the write endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Failure envelope for the write endpoints.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Response body for GET /api/analytics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub page_views: usize,
    pub clicks: usize,
    pub form_submits: usize,
    pub recent_interactions: Vec<InteractionRecord>,
}

/// Error body for GET /api/analytics.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
}

/// GET /
pub async fn get_root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Routivate Backend API".to_string(),
    })
}

/// POST /api/track
///
/// Stores one interaction event. Tracking is best-effort telemetry on the
/// client side, so the response carries no detail beyond success.
pub async fn post_track(
    State(state): State<AppState>,
    client: ClientInfo,
    Payload(body): Payload<TrackRequest>,
) -> Response {
    let interaction = body.into_record(client);

    match state.interactions.save(&interaction).await {
        Ok(()) => {
            debug!(
                kind = ?interaction.kind,
                page = ?interaction.page,
                "interaction logged"
            );
            (StatusCode::OK, Json(SuccessResponse::ok())).into_response()
        }
        Err(e) => {
            error!(error = %e, "error logging interaction");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse::new("Failed to log interaction")),
            )
                .into_response()
        }
    }
}

/// POST /api/contact
///
/// Stores one contact-form submission. Field validation happens in the
/// browser; anything that arrives is stored.
pub async fn post_contact(
    State(state): State<AppState>,
    client: ClientInfo,
    Payload(body): Payload<ContactRequest>,
) -> Response {
    let contact = body.into_record(client);

    match state.contacts.save(&contact).await {
        Ok(()) => {
            debug!("contact submission saved");
            (
                StatusCode::OK,
                Json(SuccessResponse::with_message("Message sent successfully")),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "error saving contact");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse::new("Failed to send message")),
            )
                .into_response()
        }
    }
}

/// GET /api/analytics
pub async fn get_analytics(State(state): State<AppState>) -> Response {
    match collect_analytics(&state).await {
        Ok(analytics) => (StatusCode::OK, Json(analytics)).into_response(),
        Err(e) => {
            error!(error = %e, "error fetching analytics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch analytics".to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn collect_analytics(state: &AppState) -> Result<AnalyticsResponse, RoutivateError> {
    let page_views = InteractionFilter::new().kind(PAGE_VIEW);
    let clicks = InteractionFilter::new().kind(CLICK);
    let recent = InteractionQuery::new().limit(RECENT_INTERACTIONS_LIMIT);

    let (page_views, clicks, form_submits, recent_interactions) = tokio::try_join!(
        state.interactions.count(&page_views),
        state.interactions.count(&clicks),
        state.contacts.count(),
        state.interactions.find(&recent),
    )?;

    Ok(AnalyticsResponse {
        page_views,
        clicks,
        form_submits,
        recent_interactions,
    })
}
