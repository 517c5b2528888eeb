//! Message entity for renter-to-owner contact messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message sent to a listing owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message
    pub id: Uuid,

    /// User who sent the message
    pub sender_id: Uuid,

    /// User the message was addressed to (the listing owner)
    pub recipient_id: Uuid,

    /// Listing the message was sent about
    ///
    /// Deliberately a weak reference: the listing may have been deleted
    /// since, so readers must tolerate `None` and dangling ids.
    pub listing_id: Option<Uuid>,

    /// Message body as typed by the sender
    pub body: String,

    /// Whether the recipient has read the message
    pub is_read: bool,

    /// Timestamp when the message was sent
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new unread message
    pub fn new(sender_id: Uuid, recipient_id: Uuid, listing_id: Option<Uuid>, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            recipient_id,
            listing_id,
            body,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
