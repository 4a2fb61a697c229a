//! Weather/time context endpoint

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::ApiError;
use crate::services::WeatherContext;
use crate::AppState;
use moodcast_common::Coordinate;

/// Query parameters for the context endpoint
#[derive(Debug, Deserialize)]
pub struct ContextQuery {
    pub lat: f64,
    pub lon: f64,
}

/// GET /context?lat&lon
///
/// Runs the weather resolver only. Success returns the resolved weather and
/// local-time context; an upstream failure returns `{"error": message}`.
pub async fn context(
    State(state): State<AppState>,
    Query(query): Query<ContextQuery>,
) -> Result<Json<WeatherContext>, ApiError> {
    let coord = Coordinate {
        latitude: query.lat,
        longitude: query.lon,
    };

    let ctx = state.weather.current(&coord).await?;
    Ok(Json(ctx))
}
