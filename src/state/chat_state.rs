//! ChatState - Conversations and Bounded Message History

use crate::constants::CHAT_HISTORY_CAPACITY;
use crate::domain::chat::{ChatMessage, Conversation};
use crate::error::ApiError;
use crate::helpers::BoundedDeque;
use crate::state::{Collection, LoadState};
use ahash::AHashMap;

#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub conversations: Collection<Conversation>,
    messages: AHashMap<String, BoundedDeque<ChatMessage>>,
    messages_state: LoadState,
}

impl ChatState {
    pub fn messages(&self, conversation_id: &str) -> impl Iterator<Item = &ChatMessage> {
        self.messages
            .get(conversation_id)
            .into_iter()
            .flat_map(|history| history.iter())
    }

    pub fn messages_state(&self) -> &LoadState {
        &self.messages_state
    }

    pub fn unread_total(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread_count).sum()
    }

    pub(crate) fn set_messages_pending(&mut self) {
        self.messages_state = LoadState::Loading;
    }

    pub(crate) fn set_messages(&mut self, conversation_id: String, messages: Vec<ChatMessage>) {
        let mut history = BoundedDeque::new(CHAT_HISTORY_CAPACITY);
        history.extend(messages);
        self.messages.insert(conversation_id, history);
        self.messages_state = LoadState::Loaded;
    }

    pub(crate) fn set_messages_failed(&mut self, err: ApiError) {
        self.messages_state = LoadState::Failed(err);
    }

    /// Append a sent or received message, replacing a copy with the same id
    pub(crate) fn append(&mut self, message: ChatMessage) {
        let conversation_id = message.conversation.id.clone();
        if let Some(conversation) = self.conversations.get_mut(&conversation_id) {
            conversation.last_message = Some(message.body.clone());
            if message.sent_at.is_some() {
                conversation.updated_at = message.sent_at;
            }
        }
        let history = self
            .messages
            .entry(conversation_id)
            .or_insert_with(|| BoundedDeque::new(CHAT_HISTORY_CAPACITY));
        if !message.id.is_empty() {
            history.retain(|m| m.id != message.id);
        }
        history.push(message);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
