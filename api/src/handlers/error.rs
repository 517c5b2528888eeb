//! Mapping from domain errors to HTTP responses.
//!
//! Every [`DomainError`] variant maps to exactly one status code and
//! one stable error code, so clients can branch on the code without
//! parsing messages.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use roost_core::errors::DomainError;
use roost_shared::errors::error_codes;

/// Convert a domain error into its HTTP response
///
/// Client errors keep their message; server-side failures are logged in
/// full and answered with a generic message so internals never leak.
pub fn domain_error_response(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Unauthenticated => {
            ErrorResponse::new(error_codes::UNAUTHENTICATED, "Authentication required")
                .to_response(StatusCode::UNAUTHORIZED)
        }
        DomainError::Unauthorized => ErrorResponse::new(
            error_codes::FORBIDDEN,
            "Not permitted to modify this resource",
        )
        .to_response(StatusCode::FORBIDDEN),
        DomainError::NotFound { resource } => {
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource))
                .to_response(StatusCode::NOT_FOUND)
        }
        DomainError::Validation { message } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message)
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Persistence { message } => {
            tracing::error!(%message, "persistence error");
            ErrorResponse::new(error_codes::PERSISTENCE_ERROR, "A storage error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
        DomainError::UploadFailed { message } => {
            tracing::error!(%message, "media upload failed");
            ErrorResponse::new(error_codes::UPLOAD_FAILED, message)
                .to_response(StatusCode::BAD_GATEWAY)
        }
        DomainError::Cache { message } => {
            tracing::error!(%message, "cache error");
            ErrorResponse::new(error_codes::CACHE_ERROR, "A cache error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
        DomainError::Internal { message } => {
            tracing::error!(%message, "internal error");
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Convert schema validation failures into a 400 response
///
/// Field errors are attached under `details` keyed by field path, one
/// list of messages per field.
pub fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    response.to_response(StatusCode::BAD_REQUEST)
}
