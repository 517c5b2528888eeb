//! Application state and factory
//!
//! This module holds the shared service graph and the factory that
//! assembles the Actix-web application around it.

use actix_web::http::StatusCode;
use actix_web::{error, middleware::Logger, web, App, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::middleware::cors::build_cors;
use crate::middleware::session::{SessionExtraction, TokenVerifier};
use crate::routes::listings::{
    browse_listings, create_listing, delete_listing, featured_listings, get_listing,
    owned_listings, search_listings,
};
use crate::routes::messages::{inbox, unread_count};
use crate::routes::session::{current_user, establish_session};

use roost_core::repositories::{ListingRepository, MessageRepository, UserRepository};
use roost_core::services::cache::PageCache;
use roost_core::services::listings::{ListingLifecycleService, ListingSearchService};
use roost_core::services::media::MediaStore;
use roost_core::services::messages::MessageService;
use roost_core::services::session::{IdentityProvider, SessionService};
use roost_shared::config::AppConfig;
use roost_shared::errors::error_codes;

/// Application state that holds shared services
pub struct AppState<U, L, M, C, G, I>
where
    U: UserRepository,
    L: ListingRepository,
    M: MediaStore,
    C: PageCache,
    G: MessageRepository,
    I: IdentityProvider,
{
    pub session_service: Arc<SessionService<U>>,
    pub search_service: Arc<ListingSearchService<L, C>>,
    pub lifecycle_service: Arc<ListingLifecycleService<L, U, M, C>>,
    pub message_service: Arc<MessageService<G, U>>,
    pub identity_provider: Arc<I>,
}

/// Create and configure the application with all dependencies
pub fn create_app<U, L, M, C, G, I>(
    app_state: web::Data<AppState<U, L, M, C, G, I>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    let cors = build_cors(&config.cors);

    // The session middleware reaches the verifier through dynamic
    // dispatch so it does not have to carry the state's type parameters
    let verifier: Arc<dyn TokenVerifier> = app_state.session_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(SessionExtraction)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route(
                            "/session",
                            web::post().to(establish_session::<U, L, M, C, G, I>),
                        )
                        .route("/me", web::get().to(current_user::<U, L, M, C, G, I>)),
                )
                .service(
                    web::scope("/listings")
                        // Static segments must register before the {id} pattern
                        .route("/search", web::get().to(search_listings::<U, L, M, C, G, I>))
                        .route(
                            "/featured",
                            web::get().to(featured_listings::<U, L, M, C, G, I>),
                        )
                        .route("/mine", web::get().to(owned_listings::<U, L, M, C, G, I>))
                        .route("", web::get().to(browse_listings::<U, L, M, C, G, I>))
                        .route("", web::post().to(create_listing::<U, L, M, C, G, I>))
                        .route("/{id}", web::get().to(get_listing::<U, L, M, C, G, I>))
                        .route("/{id}", web::delete().to(delete_listing::<U, L, M, C, G, I>)),
                )
                .service(
                    web::scope("/messages")
                        .route(
                            "/unread-count",
                            web::get().to(unread_count::<U, L, M, C, G, I>),
                        )
                        .route("", web::get().to(inbox::<U, L, M, C, G, I>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "roost-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
        .to_response(StatusCode::NOT_FOUND)
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    error::InternalError::from_response(err, response).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    error::InternalError::from_response(err, response).into()
}
