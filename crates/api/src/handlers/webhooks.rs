//! Identity-provider webhook: provisions user rows on `user.created`.
//!
//! Every request must carry three signature headers; the body is
//! verified before any event field is interpreted. Event types other
//! than `user.created` are acknowledged and ignored.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use boxd_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Event type that triggers user provisioning.
const EVENT_USER_CREATED: &str = "user.created";

/// Signature header names, matching the identity provider's delivery
/// infrastructure.
const HEADER_ID: &str = "svix-id";
const HEADER_TIMESTAMP: &str = "svix-timestamp";
const HEADER_SIGNATURE: &str = "svix-signature";

/// The slice of a webhook event this server cares about.
#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: EventData,
}

#[derive(Debug, Default, Deserialize)]
struct EventData {
    id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub message: String,
}

/// POST /api/webhooks
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let Some(secret) = &state.config.webhook_secret else {
        return Err(AppError::MissingConfig("WEBHOOK_SIGNING_SECRET"));
    };

    let msg_id = header_str(&headers, HEADER_ID);
    let timestamp = header_str(&headers, HEADER_TIMESTAMP);
    let signature = header_str(&headers, HEADER_SIGNATURE);
    let (Some(msg_id), Some(timestamp), Some(signature)) = (msg_id, timestamp, signature) else {
        return Err(AppError::BadRequest("Missing signature headers".into()));
    };

    let now = chrono::Utc::now().timestamp();
    secret
        .verify(msg_id, timestamp, &body, signature, now)
        .map_err(|err| {
            tracing::warn!(error = %err, msg_id, "Webhook signature rejected");
            AppError::BadRequest("Webhook verification failed".into())
        })?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Malformed event payload".into()))?;

    if event.event_type == EVENT_USER_CREATED {
        let Some(user_id) = event.data.id else {
            return Err(AppError::BadRequest("Event data missing user id".into()));
        };

        // Providers redeliver events; a duplicate id is a benign no-op.
        let inserted = UserRepo::create_if_absent(&state.pool, &user_id).await?;
        if inserted {
            tracing::info!(%user_id, "User provisioned from webhook");
        } else {
            tracing::info!(%user_id, "Duplicate user.created event ignored");
        }

        return Ok(Json(WebhookAck {
            message: "User saved to DB".into(),
        }));
    }

    tracing::debug!(event_type = %event.event_type, "Unhandled webhook event type");
    Ok(Json(WebhookAck {
        message: "Unhandled event".into(),
    }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
