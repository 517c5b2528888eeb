//! Inbox route handlers.

use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::message::{InboxMessageResponse, UnreadCountResponse};
use crate::handlers::domain_error_response;
use crate::middleware::session::RequestSession;

use roost_core::repositories::{ListingRepository, MessageRepository, UserRepository};
use roost_core::services::cache::PageCache;
use roost_core::services::media::MediaStore;
use roost_core::services::session::IdentityProvider;

/// Handler for GET /api/v1/messages
///
/// The signed-in user's inbox, unread first, newest first within each
/// group. The recipient is always the caller; there is no way to read
/// someone else's messages.
pub async fn inbox<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
    session: RequestSession,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    match state.message_service.inbox(session.as_session()).await {
        Ok(messages) => {
            let body: Vec<InboxMessageResponse> = messages.into_iter().map(Into::into).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/messages/unread-count
pub async fn unread_count<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
    session: RequestSession,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    match state.message_service.unread_count(session.as_session()).await {
        Ok(count) => HttpResponse::Ok().json(UnreadCountResponse { count }),
        Err(error) => domain_error_response(error),
    }
}
