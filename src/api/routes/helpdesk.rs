//! Helpdesk Proxy Routes
//!
//! Same-origin surface for the helpdesk API. The static API key is
//! injected by the client in this process; the browser never sees it.
//!
//! - GET /api/helpdesk/conversations
//! - GET /api/helpdesk/conversations/:id/messages
//! - POST /api/helpdesk/conversations/:id/messages
//! - GET /api/helpdesk/contacts?page=N

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ContactsQuery, SendMessageBody};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::helpdesk::{ContactsPage, Conversation, Message};

/// GET /api/helpdesk/conversations
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Conversation>>> {
    let conversations = state.helpdesk()?.list_conversations().await?;

    tracing::debug!(count = conversations.len(), "Fetched conversations");
    Ok(Json(conversations))
}

/// GET /api/helpdesk/conversations/:id/messages
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<u64>,
) -> ApiResult<Json<Vec<Message>>> {
    let messages = state.helpdesk()?.list_messages(conversation_id).await?;
    Ok(Json(messages))
}

/// POST /api/helpdesk/conversations/:id/messages
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<u64>,
    Json(body): Json<SendMessageBody>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    if body.content.trim().is_empty() {
        return Err(ApiError::Validation("message content is empty".to_string()));
    }

    let message = state
        .helpdesk()?
        .send_message(conversation_id, &body.content)
        .await?;

    tracing::info!(conversation_id, message_id = message.id, "Message relayed");
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/helpdesk/contacts?page=N
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContactsQuery>,
) -> ApiResult<Json<ContactsPage>> {
    if query.page == 0 {
        return Err(ApiError::Validation("page starts at 1".to_string()));
    }

    let page = state.helpdesk()?.list_contacts(query.page).await?;
    Ok(Json(page))
}
