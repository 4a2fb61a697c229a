//! Upstream service clients
//!
//! Three independent collaborators: current weather (OpenWeather), song
//! suggestions (OpenRouter chat completions), and catalog metadata (Spotify
//! search). Each is reached through an object-safe trait so the HTTP layer
//! can be exercised with in-process fakes.

use async_trait::async_trait;
use moodcast_common::Coordinate;

pub mod enrich;
pub mod openrouter;
pub mod openweather;
pub mod spotify;

pub use enrich::enrich;
pub use openrouter::{OpenRouterClient, SuggestError, Suggestions};
pub use openweather::{OpenWeatherClient, WeatherContext, WeatherError};
pub use spotify::{CatalogError, SpotifyClient, TrackMatch};

/// Current-conditions lookup for a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve current weather plus local time context for a coordinate.
    ///
    /// One attempt, no retry; upstream failures are reported, never retried.
    async fn current(&self, coord: &Coordinate) -> Result<WeatherContext, WeatherError>;
}

/// Language-model song suggestion for a prepared prompt.
#[async_trait]
pub trait SongSuggester: Send + Sync {
    /// Request song suggestions for the prompt.
    ///
    /// Returns `Suggestions::Unparseable` when the completion content is not
    /// a strict JSON array; transport and API failures are errors.
    async fn suggest(&self, prompt: &str) -> Result<Suggestions, SuggestError>;
}

/// Free-text track lookup against a music catalog.
#[async_trait]
pub trait CatalogSearcher: Send + Sync {
    /// Find the best track match for a query, if any.
    async fn find_track(&self, query: &str) -> Result<Option<TrackMatch>, CatalogError>;
}
