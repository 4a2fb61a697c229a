//! Recommendation endpoint
//!
//! Orchestrates the full cycle: weather lookup, prompt construction, model
//! suggestion, then concurrent catalog enrichment. The three stages run
//! strictly in sequence because each consumes the previous stage's output.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::ApiError;
use crate::prompt::build_prompt;
use crate::services::{enrich, Suggestions};
use crate::AppState;
use moodcast_common::{Coordinate, RecommendationResponse};

/// Request body for `POST /recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub lat: f64,
    pub lon: f64,
    /// Free-text preference; defaults to empty when absent
    #[serde(default)]
    pub user_input: String,
}

/// POST /recommend
pub async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let coord = Coordinate {
        latitude: req.lat,
        longitude: req.lon,
    };

    let ctx = state.weather.current(&coord).await?;

    let prompt = build_prompt(
        state.prompt_template.as_deref(),
        &ctx.weather.description,
        ctx.time_of_day,
        &req.user_input,
    );

    let songs = match state.suggester.suggest(&prompt).await? {
        Suggestions::Songs(songs) => songs,
        Suggestions::Unparseable => {
            warn!("Model output was not parseable; returning no recommendations");
            Vec::new()
        }
    };

    info!(
        "Suggested {} songs for {} / {}",
        songs.len(),
        ctx.time_of_day,
        ctx.weather.description
    );

    let recommendations = enrich(state.catalog.as_ref(), songs).await;

    Ok(Json(RecommendationResponse {
        local_time: ctx.local_time,
        time_of_day: ctx.time_of_day,
        weather: ctx.weather,
        recommendations,
    }))
}
