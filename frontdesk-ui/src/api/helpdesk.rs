//! Helpdesk API (via the server proxy)
//!
//! Conversations, messages and contacts live in the external helpdesk
//! system. The SPA reaches it through the server's same-origin
//! `/api/helpdesk` routes; the API key stays on the server.

use gloo_net::http::Request;

use super::server_error_message;

// ============ Response Types ============

/// A helpdesk conversation with its sender metadata
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Conversation {
    pub id: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
    /// Unix seconds of the last activity
    #[serde(default)]
    pub last_activity_at: i64,
    #[serde(default)]
    pub meta: ConversationMeta,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct ConversationMeta {
    #[serde(default)]
    pub sender: Option<Sender>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Message direction as normalized by the server proxy
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// One message within a conversation
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Message {
    pub id: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub processed_message_content: Option<String>,
    #[serde(rename = "message_type")]
    pub direction: Direction,
    /// Unix seconds
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default)]
    pub metadata: Option<AttachmentMetadata>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct AttachmentMetadata {
    #[serde(default)]
    pub duration: Option<f64>,
}

/// An external contact, read-only from the dashboard's perspective
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Contact {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ContactsPage {
    #[serde(default)]
    pub payload: Vec<Contact>,
    pub meta: PageMeta,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

// ============ API Functions ============

/// Fetch all conversations
pub async fn fetch_conversations() -> Result<Vec<Conversation>, String> {
    let response = Request::get("/api/helpdesk/conversations")
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(server_error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the messages of one conversation
pub async fn fetch_messages(conversation_id: u64) -> Result<Vec<Message>, String> {
    let url = format!("/api/helpdesk/conversations/{}/messages", conversation_id);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(server_error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Send an outgoing message on a conversation
pub async fn send_message(conversation_id: u64, content: &str) -> Result<Message, String> {
    #[derive(serde::Serialize)]
    struct SendMessageRequest<'a> {
        content: &'a str,
    }

    let url = format!("/api/helpdesk/conversations/{}/messages", conversation_id);
    let response = Request::post(&url)
        .json(&SendMessageRequest { content })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(server_error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch one page of contacts
pub async fn fetch_contacts_page(page: u32) -> Result<ContactsPage, String> {
    let response = Request::get("/api/helpdesk/contacts")
        .query([("page", page.to_string().as_str())])
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(server_error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch every contact, following `meta.total_pages` until exhausted
pub async fn fetch_all_contacts() -> Result<Vec<Contact>, String> {
    let mut contacts = Vec::new();
    let mut page = 1;

    loop {
        let result = fetch_contacts_page(page).await?;
        contacts.extend(result.payload);

        if page >= result.meta.total_pages.max(1) {
            break;
        }
        page += 1;
    }

    Ok(contacts)
}
