//! HTTP surface: one thin handler per route, everything wrapped in the
//! response envelope.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use log::error;
use log::info;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::config::Config;
use crate::model::SearchOrder;
use crate::service::Services;

pub mod anime;
pub mod auth;
pub mod characters;
pub mod error;
pub mod extract;
pub mod genres;
pub mod magazines;
pub mod manga;
pub mod people;
pub mod producers;
pub mod response;
pub mod trackings;

pub(crate) const DEFAULT_PER_PAGE: u32 = 25;
pub(crate) const MAX_PER_PAGE: u32 = 50;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub config: Arc<Config>,
}

/// Assembles the full route tree with tracing and CORS layers.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(anime::router())
        .merge(manga::router())
        .merge(characters::router())
        .merge(people::router())
        .merge(genres::router())
        .merge(producers::router())
        .merge(magazines::router())
        .merge(trackings::router());

    let cors = match state
        .config
        .cors_allow_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Binds and serves until ctrl-c.
pub async fn serve(config: Arc<Config>, services: Arc<Services>) -> anyhow::Result<()> {
    let state = AppState {
        services,
        config: config.clone(),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("API server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received."),
        Err(err) => error!("Failed to listen for shutdown signal: {err}"),
    }
}

async fn health() -> ApiResponse<&'static str> {
    ApiResponse::ok("ok")
}

pub(crate) fn page_of(raw: Option<u32>) -> u32 {
    raw.unwrap_or(1).max(1)
}

pub(crate) fn per_page_of(raw: Option<u32>) -> u32 {
    raw.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

pub(crate) fn parse_order(raw: Option<&str>) -> Result<SearchOrder, ApiError> {
    match raw {
        None => Ok(SearchOrder::default()),
        Some("score") => Ok(SearchOrder::Score),
        Some("popularity") => Ok(SearchOrder::Popularity),
        Some("title") => Ok(SearchOrder::Title),
        Some("newest") => Ok(SearchOrder::Newest),
        Some(other) => Err(ApiError::BadRequest(format!(
            "Unknown order_by value: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_and_clamps() {
        assert_eq!(page_of(None), 1);
        assert_eq!(page_of(Some(0)), 1);
        assert_eq!(page_of(Some(7)), 7);
        assert_eq!(per_page_of(None), DEFAULT_PER_PAGE);
        assert_eq!(per_page_of(Some(0)), 1);
        assert_eq!(per_page_of(Some(200)), MAX_PER_PAGE);
    }

    #[test]
    fn order_parsing() {
        assert_eq!(parse_order(None).unwrap(), SearchOrder::Popularity);
        assert_eq!(parse_order(Some("score")).unwrap(), SearchOrder::Score);
        assert!(parse_order(Some("rating")).is_err());
    }
}
