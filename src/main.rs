use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use compass_rank::config::Settings;
use compass_rank::core::Recommender;
use compass_rank::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use compass_rank::services::{CacheManager, Catalog};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match std::env::var("COMPASS_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    }
    .and_then(|settings| settings.validate().map(|_| settings))
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e)))?;

    // Initialize logging; LOG_LEVEL and LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.init(),
    }

    info!("Starting Compass Rank recommendation service...");
    info!("Configuration loaded successfully");

    let catalog = Catalog::load(&settings.catalog.path).map_err(|e| {
        error!("Failed to load program catalog: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    if catalog.is_empty() {
        tracing::warn!("Catalog {} contains no programs", settings.catalog.path);
    }

    let recommender = Recommender::new(settings.scoring.clone()).map_err(|e| {
        error!("Invalid scoring policy: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Recommender initialized with weights: {:?}", recommender.policy().weights);

    // Search responses are cached in memory when enabled
    let cache = if settings.cache.enabled {
        info!(
            "Response cache enabled ({} entries, TTL: {}s)",
            settings.cache.max_entries, settings.cache.ttl_secs
        );
        Some(Arc::new(CacheManager::new(settings.cache.max_entries, settings.cache.ttl_secs)))
    } else {
        info!("Response cache disabled");
        None
    };

    // Build application state
    let app_state = AppState {
        catalog,
        recommender,
        cache,
        default_limit: settings.recommendation.default_limit,
        max_limit: settings.recommendation.max_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
