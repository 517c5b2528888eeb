use actix_web::{web, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use roost_api::app::{create_app, AppState};
use roost_core::services::listings::{
    ListingLifecycleService, ListingSearchService, SearchServiceConfig,
};
use roost_core::services::media::{MediaService, MediaServiceConfig};
use roost_core::services::messages::MessageService;
use roost_core::services::session::{SessionService, SessionServiceConfig};
use roost_infra::cache::{RedisClient, RedisPageCache};
use roost_infra::database::{
    DatabasePool, MySqlListingRepository, MySqlMessageRepository, MySqlUserRepository,
};
use roost_infra::identity::GoogleIdentityProvider;
use roost_infra::media::CloudinaryStore;
use roost_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Roost API server");

    let config = AppConfig::from_env();
    if config.auth.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set, signing sessions with the development default");
    }

    // Database pool and repositories
    let pool = DatabasePool::new(config.database.clone()).await?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let listing_repository = Arc::new(MySqlListingRepository::new(pool.get_pool().clone()));
    let message_repository = Arc::new(MySqlMessageRepository::new(pool.get_pool().clone()));

    // Redis-backed page cache
    let redis_client = RedisClient::new(config.cache.clone()).await?;
    let page_cache = Arc::new(RedisPageCache::new(redis_client, config.cache.clone()));

    // External services
    let media_store = Arc::new(CloudinaryStore::new(&config.media)?);
    let identity_provider = Arc::new(GoogleIdentityProvider::new(&config.auth)?);

    // Core services
    let session_service = Arc::new(SessionService::new(
        user_repository.clone(),
        SessionServiceConfig::from(&config.auth),
    ));
    let media_service = Arc::new(MediaService::new(
        media_store,
        MediaServiceConfig::from(&config.media),
    ));
    let search_service = Arc::new(ListingSearchService::new(
        listing_repository.clone(),
        page_cache.clone(),
        SearchServiceConfig {
            page_ttl_seconds: config.cache.page_ttl,
        },
    ));
    let lifecycle_service = Arc::new(ListingLifecycleService::new(
        listing_repository,
        session_service.clone(),
        media_service,
        page_cache,
    ));
    let message_service = Arc::new(MessageService::new(
        message_repository,
        session_service.clone(),
    ));

    let app_state = web::Data::new(AppState {
        session_service,
        search_service,
        lifecycle_service,
        message_service,
        identity_provider,
    });

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let keep_alive = Duration::from_secs(config.server.keep_alive);
    tracing::info!(%bind_address, "server listening");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &config))
        .keep_alive(keep_alive);
    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await?;

    Ok(())
}
