//! Chat Service - `/chats`

use crate::domain::chat::{ChatMessage, Conversation};
use crate::error::{Error, Result};
use crate::services::api_client::ApiClient;
use crate::services::resource::{Resource, ResourceKeys};
use serde_json::json;

const KEYS: ResourceKeys = ResourceKeys {
    path: "chats",
    entity: &["chat", "conversation"],
    list: &["chats", "conversations"],
};

#[derive(Clone)]
pub struct ChatService {
    conversations: Resource<Conversation>,
}

impl ChatService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            conversations: Resource::new(api, KEYS),
        }
    }

    pub async fn conversations(&self) -> Result<Vec<Conversation>> {
        self.conversations.list().await
    }

    /// Messages of one conversation, oldest first
    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<ChatMessage>> {
        let path = format!("{}/messages", self.conversations.item_path(conversation_id)?);
        let mut messages: Vec<ChatMessage> = self
            .conversations
            .api()
            .get_list(&path, &[], &["messages"])
            .await?;
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
        Ok(messages)
    }

    pub async fn send(&self, conversation_id: &str, body: &str) -> Result<ChatMessage> {
        let body = body.trim();
        if body.is_empty() {
            return Err(Error::Invalid {
                message: "Message is empty".to_string(),
            });
        }
        let path = format!("{}/messages", self.conversations.item_path(conversation_id)?);
        self.conversations
            .api()
            .post(&path, &json!({ "text": body }), &["message"])
            .await
    }
}
