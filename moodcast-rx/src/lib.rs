//! moodcast-rx library - weather-aware music recommendation service
//!
//! One request/response cycle orchestrates three upstream calls in sequence:
//! weather lookup, language-model song suggestion, then a concurrent catalog
//! enrichment fan-out over the suggested songs.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::services::{CatalogSearcher, SongSuggester, WeatherProvider};

pub mod api;
pub mod prompt;
pub mod services;

/// Application state shared across HTTP handlers
///
/// Each collaborator sits behind a trait object so tests can swap in fakes;
/// nothing here is mutable across requests.
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<dyn WeatherProvider>,
    pub suggester: Arc<dyn SongSuggester>,
    pub catalog: Arc<dyn CatalogSearcher>,
    /// Optional prompt template override (placeholders per `prompt`)
    pub prompt_template: Option<String>,
}

impl AppState {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        suggester: Arc<dyn SongSuggester>,
        catalog: Arc<dyn CatalogSearcher>,
        prompt_template: Option<String>,
    ) -> Self {
        Self {
            weather,
            suggester,
            catalog,
            prompt_template,
        }
    }
}

/// Build application router
///
/// CORS is open to all origins; the service fronts a browser client on a
/// different origin.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/recommend", post(api::recommend))
        .route("/context", get(api::context))
        .merge(api::health_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
}
