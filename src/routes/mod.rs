// Route exports
pub mod contributions;

use actix_cors::Cors;
use actix_web::{http::Method, web};

use crate::config::CorsSettings;

pub use contributions::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(contributions::configure);
}

/// CORS policy for the configured frontend origins
///
/// With no origins configured any origin is allowed.
pub fn cors(settings: &CorsSettings) -> Cors {
    let origins = settings.allowed_origins();
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::OPTIONS])
        .allow_any_header()
        .max_age(3600);

    if origins.is_empty() {
        return cors.allow_any_origin();
    }
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
