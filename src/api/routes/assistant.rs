//! Assistant Relay Route
//!
//! - POST /api/assistant/reply
//!
//! Forwards the user's message to the automation webhook and returns the
//! webhook's text body as the assistant reply. The webhook URL comes from
//! server configuration so the SPA does not need to know it.

use axum::{extract::State, Json};
use serde_json::json;
use std::sync::Arc;

use crate::api::dto::{AssistantReplyRequest, AssistantReplyResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// POST /api/assistant/reply
pub async fn assistant_reply(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AssistantReplyRequest>,
) -> ApiResult<Json<AssistantReplyResponse>> {
    if !state.config.assistant.is_configured() {
        return Err(ApiError::Unconfigured("assistant"));
    }
    if body.message.trim().is_empty() {
        return Err(ApiError::Validation("message is empty".to_string()));
    }

    let response = state
        .http
        .post(&state.config.assistant.webhook_url)
        .json(&json!({ "message": body.message }))
        .send()
        .await
        .map_err(|e| ApiError::Internal(format!("Webhook request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(ApiError::Internal(format!(
            "Webhook returned status {}",
            response.status()
        )));
    }

    let reply = response
        .text()
        .await
        .map_err(|e| ApiError::Internal(format!("Webhook response unreadable: {}", e)))?;

    Ok(Json(AssistantReplyResponse { reply }))
}
