use actix_web::{middleware, web, App, HttpServer};
use contrib_heatmap::config::{LoggingSettings, Settings};
use contrib_heatmap::core::Theme;
use contrib_heatmap::error::query_config;
use contrib_heatmap::routes::{self, AppState};
use contrib_heatmap::services::GithubClient;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);
    info!("Starting contribution heat-map service...");

    if settings.github.token.is_empty() {
        warn!("GITHUB_TOKEN is not set, upstream requests will be rejected");
    }
    if Theme::by_name(&settings.render.default_theme).is_none() {
        error!("Unknown default theme: {}", settings.render.default_theme);
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Unknown default theme: {}", settings.render.default_theme),
        ));
    }

    let github = GithubClient::from_settings(&settings.github).map_err(|e| {
        error!("Failed to initialize GitHub client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("GitHub client initialized for {}", settings.github.endpoint);

    let app_state = AppState {
        github: Arc::new(github),
        default_theme: settings.render.default_theme.clone(),
    };

    let cors_settings = settings.cors.clone();
    info!("Allowed origins: {:?}", cors_settings.allowed_origins());

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(query_config())
            .wrap(routes::cors(&cors_settings))
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
