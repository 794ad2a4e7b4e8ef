use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::sync::Arc;
use swipe_deck::config::Settings;
use swipe_deck::core::DeckController;
use swipe_deck::routes::{self, deck::AppState};
use swipe_deck::services::{ApiClient, FeedStore};
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Swipe Deck service...");

    let timeout = settings.api.timeout_secs.unwrap_or(15);
    let api = Arc::new(
        ApiClient::new(settings.api.base_url.clone(), settings.api.session_token.clone(), timeout)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?,
    );

    info!("API client initialized for {} (timeout: {}s)", settings.api.base_url, timeout);

    let feed = Arc::new(FeedStore::new());
    let tuning = settings.deck.tuning();
    let controller = Arc::new(
        DeckController::new(tuning, api.clone(), feed.clone()).with_preview(settings.deck.preview),
    );

    info!("Deck controller initialized with {:?} (preview: {})", tuning, settings.deck.preview);

    // Keep the deck in step with the feed for the life of the process
    let _follower = controller.follow(feed.subscribe());

    // Initial load; the deck stays empty until a refresh succeeds
    match api.refresh_feed(&feed).await {
        Ok(count) => info!("Loaded {} candidates", count),
        Err(e) => warn!("Initial feed load failed, waiting for refresh: {}", e),
    }

    let app_state = AppState {
        controller,
        feed,
        api,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(1);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))
    .map_err(|e| {
        error!("Failed to bind: {}", e);
        e
    })?
    .run()
    .await
}
