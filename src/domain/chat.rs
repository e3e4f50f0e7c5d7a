//! Chat - Agent and Customer Conversations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::refs::{EntityRef, deserialize_id};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMessage {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "chatId", alias = "conversationId")]
    pub conversation: EntityRef,
    #[serde(alias = "senderId", alias = "from")]
    pub sender: EntityRef,
    #[serde(alias = "text", alias = "content")]
    pub body: String,
    #[serde(alias = "createdAt", alias = "timestamp")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(alias = "isRead")]
    pub read: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conversation {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: Option<String>,
    pub participants: Vec<EntityRef>,
    #[serde(alias = "reservationId")]
    pub reservation: EntityRef,
    pub last_message: Option<String>,
    pub unread_count: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        self.participants
            .iter()
            .map(EntityRef::display)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
