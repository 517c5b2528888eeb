//! Inbox reads gated on a resolved session

use std::sync::Arc;

use crate::domain::value_objects::identity::Session;
use crate::domain::value_objects::inbox::InboxMessage;
use crate::errors::DomainResult;
use crate::repositories::{MessageRepository, UserRepository};
use crate::services::session::SessionService;

/// Service exposing a user's message inbox
///
/// Every read resolves the caller's session first; the recipient is
/// always the authenticated user, never a parameter.
pub struct MessageService<G, U>
where
    G: MessageRepository,
    U: UserRepository,
{
    message_repository: Arc<G>,
    session_service: Arc<SessionService<U>>,
}

impl<G, U> MessageService<G, U>
where
    G: MessageRepository,
    U: UserRepository,
{
    /// Create a new message service
    pub fn new(message_repository: Arc<G>, session_service: Arc<SessionService<U>>) -> Self {
        Self {
            message_repository,
            session_service,
        }
    }

    /// Fetch the caller's inbox, unread first, newest first within each group
    pub async fn inbox(&self, session: Option<&Session>) -> DomainResult<Vec<InboxMessage>> {
        let identity = self.session_service.resolve(session).await?;
        self.message_repository.inbox_for(identity.user_id).await
    }

    /// Count the caller's unread messages
    pub async fn unread_count(&self, session: Option<&Session>) -> DomainResult<u64> {
        let identity = self.session_service.resolve(session).await?;
        self.message_repository.count_unread(identity.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use crate::domain::entities::message::Message;
    use crate::domain::entities::user::User;
    use crate::errors::DomainError;
    use crate::repositories::{MockMessageRepository, MockUserRepository};
    use crate::services::session::SessionServiceConfig;

    struct Fixture {
        messages: Arc<MockMessageRepository>,
        users: Arc<MockUserRepository>,
        service: MessageService<MockMessageRepository, MockUserRepository>,
    }

    fn fixture() -> Fixture {
        let messages = Arc::new(MockMessageRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let session_service = Arc::new(SessionService::new(
            users.clone(),
            SessionServiceConfig::default(),
        ));
        let service = MessageService::new(messages.clone(), session_service);
        Fixture {
            messages,
            users,
            service,
        }
    }

    async fn recipient(fixture: &Fixture) -> (User, Session) {
        let user = User::new("owner@example.com".to_string(), "Owner".to_string(), None);
        fixture.users.insert(user.clone()).await;
        let session = Session {
            user_id: user.id,
            email: user.email.clone(),
        };
        (user, session)
    }

    fn message_at(sender: Uuid, recipient: Uuid, is_read: bool, minutes_ago: i64) -> Message {
        let mut message = Message::new(sender, recipient, Some(Uuid::new_v4()), "Is this still available?".to_string());
        message.is_read = is_read;
        message.created_at = Utc::now() - Duration::minutes(minutes_ago);
        message
    }

    #[tokio::test]
    async fn test_inbox_requires_a_session() {
        let fixture = fixture();
        let result = fixture.service.inbox(None).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_unread_count_requires_a_session() {
        let fixture = fixture();
        let result = fixture.service.unread_count(None).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_inbox_orders_unread_first_then_newest() {
        let fixture = fixture();
        let (user, session) = recipient(&fixture).await;
        let sender = Uuid::new_v4();

        fixture
            .messages
            .insert(message_at(sender, user.id, true, 5), "alice", Some("Loft"));
        fixture
            .messages
            .insert(message_at(sender, user.id, false, 30), "bob", Some("Loft"));
        fixture
            .messages
            .insert(message_at(sender, user.id, false, 10), "carol", Some("Loft"));

        let inbox = fixture.service.inbox(Some(&session)).await.unwrap();
        let order: Vec<&str> = inbox.iter().map(|m| m.sender_username.as_str()).collect();
        // Unread carol (10m) before unread bob (30m); read alice last despite being newest
        assert_eq!(order, vec!["carol", "bob", "alice"]);
    }

    #[tokio::test]
    async fn test_inbox_is_scoped_to_the_caller() {
        let fixture = fixture();
        let (user, session) = recipient(&fixture).await;
        let sender = Uuid::new_v4();

        fixture
            .messages
            .insert(message_at(sender, user.id, false, 1), "alice", Some("Loft"));
        fixture
            .messages
            .insert(message_at(sender, Uuid::new_v4(), false, 1), "bob", Some("Barn"));

        let inbox = fixture.service.inbox(Some(&session)).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].sender_username, "alice");
    }

    #[tokio::test]
    async fn test_inbox_keeps_messages_about_deleted_listings() {
        let fixture = fixture();
        let (user, session) = recipient(&fixture).await;

        let mut orphaned = message_at(Uuid::new_v4(), user.id, false, 1);
        orphaned.listing_id = None;
        fixture.messages.insert(orphaned, "alice", None);

        let inbox = fixture.service.inbox(Some(&session)).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].listing_name, None);
    }

    #[tokio::test]
    async fn test_unread_count_ignores_read_and_foreign_messages() {
        let fixture = fixture();
        let (user, session) = recipient(&fixture).await;
        let sender = Uuid::new_v4();

        fixture
            .messages
            .insert(message_at(sender, user.id, false, 1), "alice", Some("Loft"));
        fixture
            .messages
            .insert(message_at(sender, user.id, false, 2), "alice", Some("Loft"));
        fixture
            .messages
            .insert(message_at(sender, user.id, true, 3), "alice", Some("Loft"));
        fixture
            .messages
            .insert(message_at(sender, Uuid::new_v4(), false, 1), "bob", Some("Barn"));

        let count = fixture.service.unread_count(Some(&session)).await.unwrap();
        assert_eq!(count, 2);
    }
}
