//! Session route handlers.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::session::{EstablishSessionRequest, IdentityResponse, SignInResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::session::RequestSession;

use roost_core::repositories::{ListingRepository, MessageRepository, UserRepository};
use roost_core::services::cache::PageCache;
use roost_core::services::media::MediaStore;
use roost_core::services::session::IdentityProvider;

/// Handler for POST /api/v1/auth/session
///
/// Exchanges an identity provider id token for a Roost session token,
/// provisioning the user on first sign-in.
///
/// # Responses
/// - 200: Sign-in succeeded, body carries the session token and user
/// - 400: Empty id token
/// - 401: The id token failed verification
pub async fn establish_session<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
    request: web::Json<EstablishSessionRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(errors);
    }

    let profile = match state.identity_provider.verify(&request.id_token).await {
        Ok(profile) => profile,
        Err(error) => return domain_error_response(error),
    };

    match state.session_service.establish(profile).await {
        Ok(sign_in) => HttpResponse::Ok().json(SignInResponse::from(sign_in)),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/auth/me
///
/// Resolves the request session to the identity it belongs to.
pub async fn current_user<U, L, M, C, G, I>(
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
    match state.session_service.resolve(session.as_session()).await {
        Ok(identity) => HttpResponse::Ok().json(IdentityResponse::from(identity)),
        Err(error) => domain_error_response(error),
    }
}
