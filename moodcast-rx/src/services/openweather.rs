//! OpenWeather current-conditions client
//!
//! Calls the current weather endpoint with lat/lon and converts the response
//! into a weather summary plus the location-local civil time and its
//! time-of-day bucket.

use async_trait::async_trait;
use moodcast_common::time::{self, TimeOfDay};
use moodcast_common::{Coordinate, WeatherSummary};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::WeatherProvider;

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Message used when the upstream error body carries no message of its own.
const FALLBACK_ERROR: &str = "Failed to fetch weather";

/// Weather lookup errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Upstream returned a non-success status; carries the upstream message
    #[error("{0}")]
    Upstream(String),

    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Resolved weather plus local time context for one coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherContext {
    pub local_time: String,
    pub time_of_day: TimeOfDay,
    pub weather: WeatherSummary,
}

/// OpenWeather API client
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_URL.to_string())
    }

    /// Construct against an alternate endpoint (integration tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, coord: &Coordinate) -> Result<WeatherContext, WeatherError> {
        let res = self
            .http
            .get(&self.base_url)
            .timeout(Duration::from_secs(30))
            .query(&[
                ("lat", coord.latitude.to_string()),
                ("lon", coord.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(WeatherError::Upstream(upstream_message(&body)));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        context_from_response(parsed)
    }
}

/// Extract the upstream `message` field, or the fallback literal.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}

/// Map a parsed current-conditions response to a `WeatherContext`.
fn context_from_response(parsed: OwCurrentResponse) -> Result<WeatherContext, WeatherError> {
    let description = parsed
        .weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let local = time::local_civil_time(parsed.dt, parsed.timezone).ok_or_else(|| {
        WeatherError::Parse(format!(
            "Unrepresentable observation time: dt={} timezone={}",
            parsed.dt, parsed.timezone
        ))
    })?;

    Ok(WeatherContext {
        local_time: time::format_local_time(&local),
        time_of_day: time::bucket_for(&local),
        weather: WeatherSummary {
            description,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
        },
    })
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    weather: Vec<OwWeather>,
    main: OwMain,
    /// UTC offset of the location, in seconds
    timezone: i64,
    /// Observation time, UTC unix seconds
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}
