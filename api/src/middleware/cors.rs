//! CORS middleware configuration for browser clients.
//!
//! The listing pages are rendered by a separate web frontend, so the
//! API must answer cross-origin requests from it. Origins come from
//! [`CorsConfig`] rather than being compiled in.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use roost_shared::config::CorsConfig;

/// Creates a CORS middleware instance from the given configuration.
///
/// With the default `*` origin list the policy is fully open, which
/// suits development. Production deployments list explicit origins via
/// `CORS_ALLOWED_ORIGINS`.
pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .expose_headers(vec![header::LOCATION])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        // A wildcard origin cannot carry credentials, so this only
        // applies to an explicit origin list
        if config.allow_credentials {
            cors = cors.supports_credentials();
        }
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cors_with_default_config() {
        let _cors = build_cors(&CorsConfig::default());
        // Wildcard configuration builds without panicking
    }

    #[test]
    fn test_build_cors_with_explicit_origins() {
        let config = CorsConfig {
            allowed_origins: vec![
                "https://app.roost.test".to_string(),
                "https://admin.roost.test".to_string(),
            ],
            allow_credentials: true,
            ..Default::default()
        };
        let _cors = build_cors(&config);
    }
}
