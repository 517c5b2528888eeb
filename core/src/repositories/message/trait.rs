//! Message repository trait for inbox queries.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::value_objects::inbox::InboxMessage;
use crate::errors::DomainError;

/// Repository trait for reading a user's message inbox
///
/// The inbox is a read model: messages are joined with the sender's
/// username and the listing name at query time. A deleted listing
/// yields `listing_name: None` rather than dropping the message.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Fetch all messages addressed to a user
    ///
    /// Ordered with unread messages first, then newest first within
    /// each group.
    async fn inbox_for(&self, recipient: Uuid) -> Result<Vec<InboxMessage>, DomainError>;

    /// Count unread messages addressed to a user
    async fn count_unread(&self, recipient: Uuid) -> Result<u64, DomainError>;
}
