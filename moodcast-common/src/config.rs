//! Configuration loading
//!
//! All upstream credentials arrive via environment variables (a `.env` file
//! is honored when present, loaded by the binary before this runs). The
//! resolved `Config` is built once at startup and passed explicitly into
//! each client, so tests can construct one by hand.

use crate::{Error, Result};

/// Default chat-completion model when `MOODCAST_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3.1:free";

/// Process-wide configuration resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeather API key (`OPENWEATHER_API_KEY`)
    pub openweather_api_key: String,
    /// OpenRouter API key (`OPENROUTER_API_KEY`)
    pub openrouter_api_key: String,
    /// Spotify client credentials (`SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`)
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    /// Chat-completion model identifier (`MOODCAST_MODEL`)
    pub model: String,
    /// Optional prompt template override (`MOODCAST_PROMPT_TEMPLATE`).
    /// Placeholders: `{time_of_day}`, `{weather}`, `{user_input}`.
    pub prompt_template: Option<String>,
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// Errors name the first missing required variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openweather_api_key: required("OPENWEATHER_API_KEY")?,
            openrouter_api_key: required("OPENROUTER_API_KEY")?,
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            model: std::env::var("MOODCAST_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            prompt_template: std::env::var("MOODCAST_PROMPT_TEMPLATE").ok(),
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| Error::Config(format!("Missing required environment variable: {name}")))
}
