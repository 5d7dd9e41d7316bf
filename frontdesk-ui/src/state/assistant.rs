//! AI Assistant Stores
//!
//! Chats and messages live in the `ai_chats` / `ai_messages` tables.
//! Both stores confirm remote writes before touching local state.

use leptos::*;
use serde_json::json;

use crate::api::datastore::Datastore;

/// An assistant chat thread
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AiChat {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    pub last_message_at: String,
}

/// Who authored a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message within a chat
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AiMessage {
    pub id: String,
    pub chat_id: String,
    pub content: String,
    pub role: Role,
    pub created_at: String,
}

/// Reactive chat list
#[derive(Clone, Copy)]
pub struct AiChatsStore {
    pub chats: RwSignal<Vec<AiChat>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl AiChatsStore {
    pub fn new() -> Self {
        Self {
            chats: create_rw_signal(Vec::new()),
            loading: create_rw_signal(true),
            error: create_rw_signal(None),
        }
    }

    /// Load the user's chats, most recently active first
    pub async fn load(&self, ds: &Datastore) {
        self.loading.set(true);
        self.error.set(None);

        match ds
            .select::<AiChat>("ai_chats", &[("order", "last_message_at.desc")])
            .await
        {
            Ok(rows) => self.chats.set(rows),
            Err(e) => self.error.set(Some(e)),
        }

        self.loading.set(false);
    }

    /// Create a chat owned by the signed-in user
    pub async fn create(
        &self,
        ds: &Datastore,
        user_id: &str,
        title: &str,
    ) -> Result<AiChat, String> {
        let created: AiChat = ds
            .insert("ai_chats", &json!({ "user_id": user_id, "title": title }))
            .await?;

        self.chats.update(|list| list.insert(0, created.clone()));
        Ok(created)
    }

    /// Rename a chat
    pub async fn rename(&self, ds: &Datastore, chat_id: &str, title: &str) -> Result<(), String> {
        let _: AiChat = ds
            .update("ai_chats", "id", chat_id, &json!({ "title": title }))
            .await?;

        let title = title.to_string();
        self.chats.update(|list| {
            if let Some(chat) = list.iter_mut().find(|c| c.id == chat_id) {
                chat.title = title;
            }
        });
        Ok(())
    }

    /// Delete a chat
    pub async fn delete(&self, ds: &Datastore, chat_id: &str) -> Result<(), String> {
        ds.delete("ai_chats", "id", chat_id).await?;
        self.chats.update(|list| list.retain(|c| c.id != chat_id));
        Ok(())
    }
}

/// Reactive message list for the selected chat
#[derive(Clone, Copy)]
pub struct AiMessagesStore {
    pub messages: RwSignal<Vec<AiMessage>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    /// The chat the list currently belongs to. Responses for any other
    /// chat are stale and must be discarded.
    pub active_chat: RwSignal<Option<String>>,
}

impl AiMessagesStore {
    pub fn new() -> Self {
        Self {
            messages: create_rw_signal(Vec::new()),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
            active_chat: create_rw_signal(None),
        }
    }

    /// Switch to `chat_id` and load its messages, oldest first.
    ///
    /// The selection may change again while the fetch is in flight; the
    /// result is applied only if this chat is still the active one.
    pub async fn select_chat(&self, ds: &Datastore, chat_id: &str) {
        self.active_chat.set(Some(chat_id.to_string()));
        self.loading.set(true);
        self.error.set(None);

        let filter = format!("eq.{}", chat_id);
        let result = ds
            .select::<AiMessage>(
                "ai_messages",
                &[("chat_id", filter.as_str()), ("order", "created_at.asc")],
            )
            .await;

        if self.active_chat.get_untracked().as_deref() != Some(chat_id) {
            return; // stale response for a superseded selection
        }

        match result {
            Ok(rows) => self.messages.set(rows),
            Err(e) => self.error.set(Some(e)),
        }
        self.loading.set(false);
    }

    /// Clear the selection
    pub fn clear(&self) {
        self.active_chat.set(None);
        self.messages.set(Vec::new());
        self.error.set(None);
    }

    /// Persist a message; it is appended locally only when its chat is
    /// still the selected one.
    pub async fn append(
        &self,
        ds: &Datastore,
        chat_id: &str,
        content: &str,
        role: Role,
    ) -> Result<AiMessage, String> {
        let created: AiMessage = ds
            .insert(
                "ai_messages",
                &json!({ "chat_id": chat_id, "content": content, "role": role }),
            )
            .await?;

        if self.active_chat.get_untracked().as_deref() == Some(chat_id) {
            self.messages.update(|list| list.push(created.clone()));
        }
        Ok(created)
    }
}

/// Title for a chat derived from its first message
pub fn auto_title(message: &str) -> String {
    let mut title: String = message.chars().take(50).collect();
    if message.chars().count() > 50 {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_auto_title_short_message_unchanged() {
        assert_eq!(auto_title("Hello there"), "Hello there");
    }

    #[test]
    fn test_auto_title_truncates_long_message() {
        let long = "x".repeat(80);
        let title = auto_title(&long);
        assert_eq!(title.chars().count(), 53);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_auto_title_respects_char_boundaries() {
        let long = "á".repeat(60);
        let title = auto_title(&long);
        assert!(title.starts_with('á'));
        assert!(title.ends_with("..."));
    }
}
