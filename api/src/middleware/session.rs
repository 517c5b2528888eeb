//! Session extraction middleware.
//!
//! Verifies the bearer token on every request and, when it is valid,
//! stashes the resulting [`Session`] in the request extensions. The
//! middleware never rejects a request: routes that need an identity
//! pass the session down to the core services, which answer with
//! `Unauthenticated` when it is missing. Browsing stays anonymous,
//! and an expired token degrades to no session instead of breaking
//! public pages.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use roost_core::domain::value_objects::identity::Session;
use roost_core::errors::DomainError;
use roost_core::repositories::UserRepository;
use roost_core::services::session::SessionService;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

/// Session extraction middleware factory
pub struct SessionExtraction;

impl<S, B> Transform<S, ServiceRequest> for SessionExtraction
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionExtractionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionExtractionMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session extraction middleware service
pub struct SessionExtractionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionExtractionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if let Some(token) = extract_bearer_token(&req) {
                if let Some(verifier) = req.app_data::<web::Data<Arc<dyn TokenVerifier>>>() {
                    match verifier.verify_token(&token) {
                        Ok(session) => {
                            req.extensions_mut().insert(session);
                        }
                        Err(_) => {
                            // Invalid and absent tokens look the same further down
                            tracing::debug!("bearer token rejected, continuing without a session");
                        }
                    }
                } else {
                    tracing::error!("no token verifier registered, requests stay anonymous");
                }
            }

            service.call(req).await
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Trait for verifying session tokens behind dynamic dispatch
///
/// The middleware cannot name the concrete `SessionService<U>` without
/// dragging its type parameter through every wrap, so the app registers
/// the service as `Arc<dyn TokenVerifier>` instead.
pub trait TokenVerifier: Send + Sync {
    fn verify_token(&self, token: &str) -> Result<Session, DomainError>;
}

impl<U: UserRepository> TokenVerifier for SessionService<U> {
    fn verify_token(&self, token: &str) -> Result<Session, DomainError> {
        self.verify_token(token)
    }
}

/// Extractor handing routes the request-scoped session, if any
///
/// Always succeeds; whether a missing session is an error is a domain
/// decision, not a routing one.
pub struct RequestSession(pub Option<Session>);

impl RequestSession {
    /// The session as the core services expect it
    pub fn as_session(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

impl FromRequest for RequestSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req.extensions().get::<Session>().cloned();
        ready(Ok(RequestSession(session)))
    }
}
