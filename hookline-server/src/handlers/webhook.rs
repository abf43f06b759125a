use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use hookline_core::{
    api_routes::{DELIVERY_ID_HEADER, EVENT_KIND_HEADER},
    webhook::{Disposition, route},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    AppState,
    infra::errors::{AppError, AppResult, INTERNAL_ERROR_MESSAGE},
};

pub const INVALID_DELIVERY_MESSAGE: &str = "Invalid payload or event type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookStatus {
    Stored,
    Skipped,
    Ignored,
}

/// Acknowledgement body for every delivery that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub status: WebhookStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl WebhookAck {
    fn stored(id: Uuid) -> Self {
        Self {
            status: WebhookStatus::Stored,
            message: "Webhook processed successfully".to_string(),
            id: Some(id),
        }
    }

    fn skipped() -> Self {
        Self {
            status: WebhookStatus::Skipped,
            message: "No action data to process".to_string(),
            id: None,
        }
    }

    fn ignored(event_kind: &str) -> Self {
        Self {
            status: WebhookStatus::Ignored,
            message: format!("Event type {event_kind} not handled"),
            id: None,
        }
    }
}

/// Receive a GitHub delivery, normalize it and store the resulting activity.
///
/// Deliveries without an event kind header or without a usable JSON body are
/// rejected with 400. Anything else that parses is acknowledged with 200,
/// whether or not it produced a record; only a failed insert yields 500.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let delivery_id = header_str(&headers, DELIVERY_ID_HEADER).unwrap_or("-");

    let Some(event_kind) = header_str(&headers, EVENT_KIND_HEADER) else {
        warn!(delivery_id, "Webhook rejected: missing event kind header");
        return Err(AppError::bad_request(INVALID_DELIVERY_MESSAGE));
    };

    let Some(payload) = parse_payload(&body) else {
        warn!(
            delivery_id,
            event_kind,
            body_len = body.len(),
            "Webhook rejected: empty or malformed payload"
        );
        return Err(AppError::bad_request(INVALID_DELIVERY_MESSAGE));
    };

    let disposition = route(event_kind, &payload);
    debug!(
        delivery_id,
        event_kind,
        disposition = disposition.label(),
        "Webhook routed"
    );

    match disposition {
        Disposition::Record(record) => {
            let id = state.store().insert(&record).await.map_err(|err| {
                error!(
                    delivery_id,
                    event_kind,
                    request_id = %record.request_id,
                    error = %err,
                    "Failed to store activity"
                );
                AppError::internal(INTERNAL_ERROR_MESSAGE)
            })?;

            info!(
                delivery_id,
                %id,
                action = %record.action,
                author = %record.author,
                "Stored activity"
            );
            Ok(Json(WebhookAck::stored(id)))
        }
        Disposition::NoRecord => Ok(Json(WebhookAck::skipped())),
        Disposition::Unhandled { event_kind } => {
            info!(delivery_id, %event_kind, "Ignoring unhandled event kind");
            Ok(Json(WebhookAck::ignored(&event_kind)))
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Decode the body, treating JSON that carries nothing (`null`, `{}`, `[]`,
/// `""`, `false`, `0`) the same as no body at all.
fn parse_payload(body: &[u8]) -> Option<Value> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    let empty = match &payload {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    };
    (!empty).then_some(payload)
}
