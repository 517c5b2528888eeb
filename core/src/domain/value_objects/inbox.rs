//! Inbox view of a message with display fields joined in.

use serde::{Deserialize, Serialize};

use crate::domain::entities::message::Message;

/// A message plus the display fields the inbox page renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    /// The underlying message
    pub message: Message,

    /// Username of the sender
    pub sender_username: String,

    /// Name of the listing the message refers to
    ///
    /// `None` when the listing has been deleted since the message was
    /// sent; the message itself outlives the listing.
    pub listing_name: Option<String>,
}
