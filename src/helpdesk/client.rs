//! Helpdesk REST API Client
//!
//! HTTP client for the helpdesk's account-scoped REST API. All requests
//! carry the static `api_access_token` header from server configuration,
//! so the key never reaches the browser.
//!
//! No retries and no request timeouts: recovery is user-initiated refresh.

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::HelpdeskConfig;

/// Helpdesk REST API client
pub struct HelpdeskClient {
    client: Client,
    config: HelpdeskConfig,
}

impl HelpdeskClient {
    /// Create a new client from server configuration
    pub fn new(client: Client, config: HelpdeskConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &HelpdeskConfig {
        &self.config
    }

    fn account_url(&self, path: &str) -> String {
        format!(
            "{}/api/v1/accounts/{}/{}",
            self.config.url.trim_end_matches('/'),
            self.config.account_id,
            path
        )
    }

    /// List all conversations of the account
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, HelpdeskError> {
        let url = self.account_url("conversations");
        let envelope: ConversationsEnvelope = self.get_json(&url).await?;
        Ok(envelope.data.payload)
    }

    /// List the messages of one conversation
    pub async fn list_messages(&self, conversation_id: u64) -> Result<Vec<Message>, HelpdeskError> {
        let url = self.account_url(&format!("conversations/{}/messages", conversation_id));
        let envelope: MessagesEnvelope = self.get_json(&url).await?;
        Ok(envelope.payload)
    }

    /// Send an outgoing message on a conversation
    pub async fn send_message(
        &self,
        conversation_id: u64,
        content: &str,
    ) -> Result<Message, HelpdeskError> {
        let url = self.account_url(&format!("conversations/{}/messages", conversation_id));

        let body = SendMessageRequest {
            content: content.to_string(),
            message_type: "outgoing".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .header("api_access_token", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        read_json(response).await
    }

    /// Fetch one page of contacts; `meta.total_pages` tells the caller
    /// when to stop paging.
    pub async fn list_contacts(&self, page: u32) -> Result<ContactsPage, HelpdeskError> {
        let url = format!(
            "{}?page={}",
            self.account_url("contacts"),
            urlencoding::encode(&page.to_string())
        );
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, HelpdeskError> {
        let response = self
            .client
            .get(url)
            .header("api_access_token", &self.config.api_key)
            .send()
            .await
            .map_err(classify)?;

        read_json(response).await
    }
}

fn classify(e: reqwest::Error) -> HelpdeskError {
    if e.is_connect() {
        HelpdeskError::Unavailable
    } else {
        HelpdeskError::Request(e)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, HelpdeskError> {
    if response.status().is_success() {
        response.json().await.map_err(HelpdeskError::Request)
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(HelpdeskError::Api {
            status: status.as_u16(),
            message: text,
        })
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    content: String,
    message_type: String,
}

#[derive(Debug, Deserialize)]
struct ConversationsEnvelope {
    data: ConversationsPayload,
}

#[derive(Debug, Deserialize)]
struct ConversationsPayload {
    #[serde(default)]
    payload: Vec<Conversation>,
}

#[derive(Debug, Deserialize)]
struct MessagesEnvelope {
    #[serde(default)]
    payload: Vec<Message>,
}

/// A helpdesk conversation with its sender metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationMeta {
    #[serde(default)]
    pub sender: Option<Sender>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Message direction, normalized from the wire's mixed encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Outgoing
    }
}

// The helpdesk encodes direction either as an integer (0 = incoming) or as
// a string; everything that is not incoming renders as the agent's side.
fn direction_from_wire<'de, D: Deserializer<'de>>(d: D) -> Result<Direction, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    let incoming = match &value {
        serde_json::Value::Number(n) => n.as_i64() == Some(0),
        serde_json::Value::String(s) => s == "incoming",
        _ => false,
    };
    Ok(if incoming {
        Direction::Incoming
    } else {
        Direction::Outgoing
    })
}

/// One message within a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub processed_message_content: Option<String>,
    #[serde(
        default,
        rename = "message_type",
        deserialize_with = "direction_from_wire"
    )]
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default)]
    pub metadata: Option<AttachmentMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachmentMetadata {
    #[serde(default)]
    pub duration: Option<f64>,
}

/// An external contact, read-only from Frontdesk's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// One page of the contacts listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsPage {
    #[serde(default)]
    pub payload: Vec<Contact>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub count: u64,
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            count: 0,
            current_page: 1,
            total_pages: 1,
        }
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when communicating with the helpdesk
#[derive(Error, Debug)]
pub enum HelpdeskError {
    #[error("Helpdesk unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Helpdesk API error {status}: {message}")]
    Api { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_url() {
        let config = HelpdeskConfig {
            url: "https://desk.example.com/".to_string(),
            api_key: "k".to_string(),
            account_id: "3".to_string(),
        };
        let client = HelpdeskClient::new(Client::new(), config);
        assert_eq!(
            client.account_url("conversations"),
            "https://desk.example.com/api/v1/accounts/3/conversations"
        );
    }

    #[test]
    fn test_direction_decodes_integer_and_string() {
        let incoming: Message =
            serde_json::from_str(r#"{"id": 1, "message_type": 0, "created_at": 10}"#).unwrap();
        assert_eq!(incoming.direction, Direction::Incoming);

        let named: Message =
            serde_json::from_str(r#"{"id": 2, "message_type": "incoming", "created_at": 10}"#)
                .unwrap();
        assert_eq!(named.direction, Direction::Incoming);

        let outgoing: Message =
            serde_json::from_str(r#"{"id": 3, "message_type": 1, "created_at": 10}"#).unwrap();
        assert_eq!(outgoing.direction, Direction::Outgoing);
    }

    #[test]
    fn test_conversation_envelope_shape() {
        let raw = r#"{
            "data": {
                "meta": {"mine_count": 1},
                "payload": [{
                    "id": 9,
                    "status": "open",
                    "unread_count": 2,
                    "last_activity_at": 1748030000,
                    "meta": {"sender": {"name": "Ana", "phone_number": "+551199"}},
                    "messages": [{"id": 1, "content": "hi", "message_type": 0, "created_at": 1748020000}]
                }]
            }
        }"#;
        let envelope: ConversationsEnvelope = serde_json::from_str(raw).unwrap();
        let conversation = &envelope.data.payload[0];
        assert_eq!(conversation.id, 9);
        assert_eq!(conversation.unread_count, 2);
        assert_eq!(
            conversation.meta.sender.as_ref().unwrap().name.as_deref(),
            Some("Ana")
        );
        assert_eq!(conversation.messages[0].direction, Direction::Incoming);
    }

    #[test]
    fn test_contacts_page_defaults() {
        let page: ContactsPage = serde_json::from_str(r#"{"payload": []}"#).unwrap();
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.total_pages, 1);
        assert!(page.payload.is_empty());
    }
}
