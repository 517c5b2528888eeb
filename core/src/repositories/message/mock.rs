//! Mock implementation of MessageRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::message::Message;
use crate::domain::value_objects::inbox::InboxMessage;
use crate::errors::DomainError;

use super::r#trait::MessageRepository;

/// Mock implementation of MessageRepository for testing
///
/// Seeded with pre-joined inbox rows; the mock reproduces the inbox
/// ordering of the SQL implementation.
pub struct MockMessageRepository {
    messages: Arc<Mutex<Vec<InboxMessage>>>,
}

impl MockMessageRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed the mock with a message and its joined display fields
    pub fn insert(&self, message: Message, sender_username: &str, listing_name: Option<&str>) {
        self.messages.lock().unwrap().push(InboxMessage {
            message,
            sender_username: sender_username.to_string(),
            listing_name: listing_name.map(str::to_string),
        });
    }
}

impl Default for MockMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn inbox_for(&self, recipient: Uuid) -> Result<Vec<InboxMessage>, DomainError> {
        let messages = self.messages.lock().unwrap();
        let mut inbox: Vec<InboxMessage> = messages
            .iter()
            .filter(|m| m.message.recipient_id == recipient)
            .cloned()
            .collect();
        // Unread first, newest first within each group
        inbox.sort_by(|a, b| {
            a.message
                .is_read
                .cmp(&b.message.is_read)
                .then_with(|| b.message.created_at.cmp(&a.message.created_at))
        });
        Ok(inbox)
    }

    async fn count_unread(&self, recipient: Uuid) -> Result<u64, DomainError> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .filter(|m| m.message.recipient_id == recipient && !m.message.is_read)
            .count() as u64)
    }
}
