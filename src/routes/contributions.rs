use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{combine_with, render_png, Theme};
use crate::error::ApiError;
use crate::models::{CombinedContributionsQuery, ContributionsQuery, HealthResponse};
use crate::services::GithubClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub github: Arc<GithubClient>,
    pub default_theme: String,
}

/// Configure all contribution routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/contributions", web::get().to(get_contributions))
        .route("/combined-contributions", web::get().to(get_combined_contributions));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Raw contribution calendar for one user
///
/// GET /contributions?username={username}
///
/// Returns GitHub's GraphQL response body unmodified.
async fn get_contributions(
    state: web::Data<AppState>,
    query: web::Query<ContributionsQuery>,
) -> Result<HttpResponse, ApiError> {
    let username = query.username.trim();
    if query.validate().is_err() || username.is_empty() {
        return Err(ApiError::Validation("Username is required".to_string()));
    }

    tracing::info!("Fetching contributions for user: {}", username);

    let body = state.github.fetch_contributions(username).await.map_err(|e| {
        tracing::error!("Error fetching contributions for {}: {}", username, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(body))
}

/// Combined heat-map for several users
///
/// GET /combined-contributions?usernames={a,b,c}&theme={name}&align={index|date}
///
/// Responds with a PNG. Any failing user fails the whole request.
async fn get_combined_contributions(
    state: web::Data<AppState>,
    query: web::Query<CombinedContributionsQuery>,
) -> Result<HttpResponse, ApiError> {
    let usernames = query.username_list();
    if query.validate().is_err() || usernames.is_empty() {
        return Err(ApiError::Validation("At least one username is required".to_string()));
    }

    let theme_name = query.theme.as_deref().unwrap_or(state.default_theme.as_str());
    let theme = Theme::by_name(theme_name).ok_or_else(|| {
        ApiError::Validation(format!(
            "Unknown theme '{}', expected one of: {}",
            theme_name,
            Theme::available().join(", ")
        ))
    })?;

    tracing::info!(
        "Rendering combined contributions for {} users ({:?}, theme {})",
        usernames.len(),
        query.align,
        theme.name
    );

    let calendars = state.github.fetch_calendars(&usernames).await.map_err(|e| {
        tracing::error!("Error fetching combined contributions for {:?}: {}", usernames, e);
        e
    })?;

    let series = combine_with(&calendars, query.align)?;
    tracing::debug!("Combined series has {} days", series.len());

    let png = render_png(&series, &theme, &usernames).map_err(|e| {
        tracing::error!("Error rendering contributions image: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().content_type("image/png").body(png))
}

