//! Integration tests for the message inbox endpoints

use actix_web::{http::StatusCode, test, web};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use roost_api::app::{create_app, AppState};
use roost_api::dto::message::{InboxMessageResponse, UnreadCountResponse};
use roost_core::domain::entities::message::Message;
use roost_core::domain::entities::user::User;
use roost_core::domain::value_objects::identity::VerifiedProfile;
use roost_core::repositories::{MockListingRepository, MockMessageRepository, MockUserRepository};
use roost_core::services::cache::MockPageCache;
use roost_core::services::listings::{
    ListingLifecycleService, ListingSearchService, SearchServiceConfig,
};
use roost_core::services::media::{MediaService, MediaServiceConfig, MockMediaStore};
use roost_core::services::messages::MessageService;
use roost_core::services::session::{MockIdentityProvider, SessionService, SessionServiceConfig};
use roost_shared::config::AppConfig;
use roost_shared::errors::{error_codes, ErrorResponse};

type TestState = AppState<
    MockUserRepository,
    MockListingRepository,
    MockMediaStore,
    MockPageCache,
    MockMessageRepository,
    MockIdentityProvider,
>;

struct TestContext {
    users: Arc<MockUserRepository>,
    messages: Arc<MockMessageRepository>,
    session_service: Arc<SessionService<MockUserRepository>>,
    state: web::Data<TestState>,
}

impl TestContext {
    /// Store a user and mint a session token for them
    async fn signed_in(&self, email: &str, username: &str) -> (User, String) {
        let user = User::new(email.to_string(), username.to_string(), None);
        self.users.insert(user.clone()).await;
        let token = self.session_service.issue_token(&user).unwrap();
        (user, token)
    }
}

fn test_context() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let listings = Arc::new(MockListingRepository::new());
    let messages = Arc::new(MockMessageRepository::new());
    let media = Arc::new(MockMediaStore::new());
    let cache = Arc::new(MockPageCache::new());
    let identity_provider = Arc::new(MockIdentityProvider::new(
        "provider-id-token",
        VerifiedProfile {
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            picture: None,
        },
    ));

    let session_service = Arc::new(SessionService::new(
        users.clone(),
        SessionServiceConfig::default(),
    ));
    let media_service = Arc::new(MediaService::new(media, MediaServiceConfig::default()));
    let search_service = Arc::new(ListingSearchService::new(
        listings.clone(),
        cache.clone(),
        SearchServiceConfig::default(),
    ));
    let lifecycle_service = Arc::new(ListingLifecycleService::new(
        listings,
        session_service.clone(),
        media_service,
        cache,
    ));
    let message_service = Arc::new(MessageService::new(messages.clone(), session_service.clone()));

    let state = web::Data::new(AppState {
        session_service: session_service.clone(),
        search_service,
        lifecycle_service,
        message_service,
        identity_provider,
    });

    TestContext {
        users,
        messages,
        session_service,
        state,
    }
}

/// Build a message sent `minutes_ago` minutes in the past
fn message_from(sender: Uuid, recipient: Uuid, listing: Option<Uuid>, minutes_ago: i64) -> Message {
    let mut message = Message::new(sender, recipient, listing, "Is this still available?".to_string());
    message.created_at = Utc::now() - Duration::minutes(minutes_ago);
    message
}

#[actix_web::test]
async fn test_inbox_requires_a_session() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/v1/messages").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, error_codes::UNAUTHENTICATED);
}

#[actix_web::test]
async fn test_unread_count_requires_a_session() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/messages/unread-count")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_inbox_shows_only_the_callers_messages_in_order() {
    let ctx = test_context();
    let (ada, token) = ctx.signed_in("ada@example.com", "Ada Lovelace").await;
    let (sam, _) = ctx.signed_in("sam@example.com", "Sam Seller").await;
    let listing_id = Uuid::new_v4();

    // Read message, oldest
    let mut read = message_from(sam.id, ada.id, Some(listing_id), 30);
    read.is_read = true;
    ctx.messages.insert(read, "Sam Seller", Some("Harbor View"));
    // Unread, about a listing that has since been deleted
    ctx.messages.insert(
        message_from(sam.id, ada.id, Some(Uuid::new_v4()), 20),
        "Sam Seller",
        None,
    );
    // Unread, newest
    ctx.messages.insert(
        message_from(sam.id, ada.id, Some(listing_id), 10),
        "Sam Seller",
        Some("Harbor View"),
    );
    // Addressed to someone else entirely
    ctx.messages.insert(
        message_from(ada.id, sam.id, Some(listing_id), 5),
        "Ada Lovelace",
        Some("Harbor View"),
    );

    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;
    let req = test::TestRequest::get()
        .uri("/api/v1/messages")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let inbox: Vec<InboxMessageResponse> = test::read_body_json(resp).await;
    assert_eq!(inbox.len(), 3);

    // Unread before read, newest first within each group
    assert!(!inbox[0].is_read);
    assert!(!inbox[1].is_read);
    assert!(inbox[2].is_read);
    assert!(inbox[0].created_at > inbox[1].created_at);

    assert_eq!(inbox[0].sender_username, "Sam Seller");
    assert_eq!(inbox[0].listing_name.as_deref(), Some("Harbor View"));
    assert_eq!(inbox[0].body, "Is this still available?");

    // The deleted listing leaves the reference dangling, not the row
    assert_eq!(inbox[1].listing_name, None);
    assert!(inbox[1].listing_id.is_some());
}

#[actix_web::test]
async fn test_unread_count_counts_only_unread() {
    let ctx = test_context();
    let (ada, token) = ctx.signed_in("ada@example.com", "Ada Lovelace").await;
    let (sam, _) = ctx.signed_in("sam@example.com", "Sam Seller").await;

    let mut read = message_from(sam.id, ada.id, None, 30);
    read.is_read = true;
    ctx.messages.insert(read, "Sam Seller", None);
    ctx.messages.insert(message_from(sam.id, ada.id, None, 20), "Sam Seller", None);
    ctx.messages.insert(message_from(sam.id, ada.id, None, 10), "Sam Seller", None);

    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;
    let req = test::TestRequest::get()
        .uri("/api/v1/messages/unread-count")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: UnreadCountResponse = test::read_body_json(resp).await;
    assert_eq!(body.count, 2);
}
