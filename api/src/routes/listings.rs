//! Listing route handlers.

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::listing::{
    CreateListingRequest, CreatedListingResponse, PageQuery, SearchListingsQuery,
};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::session::RequestSession;

use roost_core::errors::DomainError;
use roost_core::repositories::{ListingRepository, MessageRepository, UserRepository};
use roost_core::services::cache::PageCache;
use roost_core::services::media::MediaStore;
use roost_core::services::session::IdentityProvider;

/// Handler for GET /api/v1/listings
///
/// Browses all listings, newest first, with `page` and `per_page`
/// query parameters. Out-of-range values are clamped, never rejected.
pub async fn browse_listings<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
    query: web::Query<PageQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    match state.search_service.browse(query.pagination()).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/listings/search
///
/// Free-text search over names, descriptions, and addresses, plus an
/// optional property type. Pages exactly like browse.
pub async fn search_listings<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
    query: web::Query<SearchListingsQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    match state
        .search_service
        .search(query.search_query(), query.pagination())
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/listings/featured
pub async fn featured_listings<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    match state.search_service.featured().await {
        Ok(listings) => HttpResponse::Ok().json(listings),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/listings/mine
///
/// All listings owned by the signed-in user, newest first.
///
/// # Responses
/// - 200: The caller's listings
/// - 401: No usable session
pub async fn owned_listings<U, L, M, C, G, I>(
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
    let identity = match state.session_service.resolve(session.as_session()).await {
        Ok(identity) => identity,
        Err(error) => return domain_error_response(error),
    };

    match state.search_service.by_owner(identity.user_id).await {
        Ok(listings) => HttpResponse::Ok().json(listings),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/listings/{id}
pub async fn get_listing<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    let id = match parse_listing_id(&path) {
        Ok(id) => id,
        Err(error) => return domain_error_response(error),
    };

    match state.search_service.get(id).await {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for POST /api/v1/listings
///
/// Creates a listing from a typed submission. On success the new
/// listing's detail path is returned in the `Location` header.
///
/// # Responses
/// - 201: Created; body carries the new id
/// - 400: Schema or domain validation failure
/// - 401: No usable session
/// - 502: An image upload was rejected by the media store
pub async fn create_listing<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
    session: RequestSession,
    request: web::Json<CreateListingRequest>,
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

    let submission = match request.into_inner().into_submission() {
        Ok(submission) => submission,
        Err(error) => return domain_error_response(error),
    };

    match state
        .lifecycle_service
        .create(session.as_session(), submission)
        .await
    {
        Ok(created) => HttpResponse::Created()
            .insert_header((header::LOCATION, created.detail_path))
            .json(CreatedListingResponse { id: created.id }),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for DELETE /api/v1/listings/{id}
///
/// # Responses
/// - 204: Deleted
/// - 401: No usable session
/// - 403: The caller does not own the listing
/// - 404: No such listing
pub async fn delete_listing<U, L, M, C, G, I>(
    state: web::Data<AppState<U, L, M, C, G, I>>,
    session: RequestSession,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    M: MediaStore + 'static,
    C: PageCache + 'static,
    G: MessageRepository + 'static,
    I: IdentityProvider + 'static,
{
    let id = match parse_listing_id(&path) {
        Ok(id) => id,
        Err(error) => return domain_error_response(error),
    };

    match state.lifecycle_service.delete(session.as_session(), id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => domain_error_response(error),
    }
}

/// Parse a listing id path segment
///
/// A malformed id can never name a listing, so it reads as absence
/// rather than as a validation failure.
fn parse_listing_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::not_found("Listing"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_id_accepts_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_listing_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_listing_id_treats_garbage_as_absent() {
        let error = parse_listing_id("definitely-not-a-uuid").unwrap_err();
        assert!(matches!(error, DomainError::NotFound { .. }));
    }
}
