//! Domain models shared between the HTTP surface and the upstream clients

use crate::time::TimeOfDay;
use serde::{Deserialize, Serialize};

/// Geographic coordinate as supplied by the client.
///
/// Treated as opaque floats; no range validation is performed.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current-conditions summary derived from the weather API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    /// Human-readable conditions, e.g. "light rain"
    pub description: String,
    /// Air temperature in °C
    pub temperature: f64,
    /// Perceived temperature in °C
    pub feels_like: f64,
}

/// One suggested song as produced by the language model, augmented with
/// catalog metadata during enrichment.
///
/// `spotify_url` and `album_cover` are absent in model output and default to
/// `None`; enrichment fills them in for catalog hits and leaves them `None`
/// for misses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SongDescriptor {
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub mood: String,
    #[serde(default)]
    pub spotify_url: Option<String>,
    #[serde(default)]
    pub album_cover: Option<String>,
}

/// Full response body for `POST /recommend`.
///
/// Ephemeral: exists only for the duration of one request/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub local_time: String,
    pub time_of_day: TimeOfDay,
    pub weather: WeatherSummary,
    pub recommendations: Vec<SongDescriptor>,
}
