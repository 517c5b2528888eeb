//! Response shapes for inbox endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_core::domain::value_objects::inbox::InboxMessage;

/// One inbox entry with its joined display fields flattened in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxMessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_username: String,
    /// `None` when the listing was deleted after the message was sent
    pub listing_id: Option<Uuid>,
    pub listing_name: Option<String>,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<InboxMessage> for InboxMessageResponse {
    fn from(entry: InboxMessage) -> Self {
        Self {
            id: entry.message.id,
            sender_id: entry.message.sender_id,
            sender_username: entry.sender_username,
            listing_id: entry.message.listing_id,
            listing_name: entry.listing_name,
            body: entry.message.body,
            is_read: entry.message.is_read,
            created_at: entry.message.created_at,
        }
    }
}

/// Response of `GET /api/v1/messages/unread-count`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}
